use ember::{
    Evaluation,
    interpreter::{lexer::{Lexer, TokenKind}, object::Object},
};

fn run(source: &str) -> Evaluation {
    ember::run(source).unwrap_or_else(|e| panic!("Script failed: {e}"))
}

fn run_value(source: &str) -> Object {
    run(source).result
}

fn run_error(source: &str) -> String {
    match ember::run(source) {
        Ok(evaluation) => {
            panic!("Script succeeded but was expected to fail, got {:?}",
                   evaluation.result)
        },
        Err(e) => e.to_string(),
    }
}

#[test]
fn lexing_a_let_statement() {
    let mut lexer = Lexer::new("let x = 5;");
    let tokens = lexer.lexing();

    let kinds = tokens.iter().map(|token| token.kind).collect::<Vec<_>>();
    assert_eq!(kinds,
               vec![TokenKind::Let,
                    TokenKind::Ident,
                    TokenKind::Assign,
                    TokenKind::Int,
                    TokenKind::Semicolon,
                    TokenKind::Eof]);

    let literals = tokens.iter()
                         .map(|token| token.literal.as_str())
                         .collect::<Vec<_>>();
    assert_eq!(literals, vec!["let", "x", "=", "5", ";", ""]);
    assert!(tokens.iter().all(|token| token.line == 1));
}

#[test]
fn lexing_is_restartable() {
    let mut lexer = Lexer::new("1 + 2");
    let first = lexer.lexing().to_vec();
    let second = lexer.lexing().to_vec();
    assert_eq!(first, second);
}

#[test]
fn observer_sees_every_token_with_its_span() {
    let source = "let x = 5;";
    let mut spans = Vec::new();

    let mut lexer = Lexer::new(source);
    lexer.lexing_observed(|token, start, end| {
        spans.push((token.literal.clone(), start, end));
    });

    assert_eq!(spans.len(), 6);
    assert_eq!(spans[0], ("let".to_string(), 0, 3));
    assert_eq!(spans[1], ("x".to_string(), 4, 5));
    assert_eq!(spans[4], (";".to_string(), 9, 10));
    // the final Eof sits at the end of the source
    assert_eq!(spans[5], (String::new(), 10, 10));

    for (literal, start, end) in &spans[..5] {
        assert_eq!(&source[*start..*end], literal.as_str());
    }
}

#[test]
fn line_numbers_follow_newlines() {
    let mut lexer = Lexer::new("let x = 5;\nlet y = 6;");
    let tokens = lexer.lexing();

    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[5].line, 2);
    assert_eq!(tokens[5].literal, "let");
}

#[test]
fn strings_report_their_opening_line() {
    let mut lexer = Lexer::new("\"a\nb\" x");
    let tokens = lexer.lexing();

    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].literal, "a\nb");
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].literal, "x");
    assert_eq!(tokens[1].line, 2);
}

#[test]
fn lexing_never_fails() {
    let mut lexer = Lexer::new("\"abc");
    let tokens = lexer.lexing();
    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].kind, TokenKind::Eof);

    let mut lexer = Lexer::new("@");
    let tokens = lexer.lexing();
    assert_eq!(tokens[0].kind, TokenKind::Illegal);
}

#[test]
fn keywords_are_recognized_by_exact_match_only() {
    let mut lexer = Lexer::new("let lets fn fnx");
    let kinds = lexer.lexing()
                     .iter()
                     .map(|token| token.kind)
                     .collect::<Vec<_>>();
    assert_eq!(kinds,
               vec![TokenKind::Let,
                    TokenKind::Ident,
                    TokenKind::Function,
                    TokenKind::Ident,
                    TokenKind::Eof]);
}

#[test]
fn identifiers_never_contain_digits() {
    let mut lexer = Lexer::new("x1");
    let tokens = lexer.lexing();
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[0].literal, "x");
    assert_eq!(tokens[1].kind, TokenKind::Int);
    assert_eq!(tokens[1].literal, "1");
}

#[test]
fn parsing_keeps_every_statement() {
    let program = ember::parse("let x = 5; x + 3;").unwrap();
    assert_eq!(program.statements.len(), 2);

    let program = ember::parse("let a = 1;\nlet b = 2;\nreturn a + b;").unwrap();
    assert_eq!(program.statements.len(), 3);
}

#[test]
fn parsed_programs_render_their_structure() {
    let rendered = ember::parse("let x = (1 + 2);").unwrap().to_string();
    assert_eq!(rendered, "let x = (1 + 2);");

    let rendered = ember::parse("1 + 2 * 3;").unwrap().to_string();
    assert_eq!(rendered, "(1 + (2 * 3));");

    let rendered = ember::parse("a + b + c;").unwrap().to_string();
    assert_eq!(rendered, "((a + b) + c);");

    let rendered = ember::parse("1 < 2 == true;").unwrap().to_string();
    assert_eq!(rendered, "((1 < 2) == true);");

    let rendered = ember::parse("-add(1, 2);").unwrap().to_string();
    assert_eq!(rendered, "(-add(1, 2));");
}

#[test]
fn missing_tokens_are_fatal() {
    let error = ember::parse("let x 5;").unwrap_err().to_string();
    assert!(error.contains("Expected next token to be '='"), "{error}");

    let error = ember::parse("let = 5;").unwrap_err().to_string();
    assert!(error.contains("an identifier"), "{error}");

    let error = ember::parse("let x = 5").unwrap_err().to_string();
    assert!(error.contains("';'"), "{error}");
}

#[test]
fn tokens_without_a_prefix_rule_are_fatal() {
    let error = ember::parse("let x = ;").unwrap_err().to_string();
    assert!(error.contains("No prefix parsing rule"), "{error}");
}

#[test]
fn illegal_tokens_surface_their_lexical_failure() {
    let error = ember::parse("let s = \"abc").unwrap_err().to_string();
    assert!(error.contains("Unterminated string"), "{error}");

    let error = ember::parse("let x = @;").unwrap_err().to_string();
    assert!(error.contains("Unexpected character '@'"), "{error}");
}

#[test]
fn oversized_integer_literals_are_fatal() {
    let error = ember::parse("99999999999999999999;").unwrap_err().to_string();
    assert!(error.contains("as an integer"), "{error}");
}

#[test]
fn arithmetic() {
    assert_eq!(run_value("let x = 5; x + 3;"), Object::Integer(8));
    assert_eq!(run_value("5 * 2 + 10;"), Object::Integer(20));
    assert_eq!(run_value("5 + 2 * 10;"), Object::Integer(25));
    assert_eq!(run_value("(5 + 10 * 2 + 15 / 3) * 2 + -10;"), Object::Integer(50));
}

#[test]
fn division_truncates_and_rejects_zero() {
    assert_eq!(run_value("7 / 2;"), Object::Integer(3));
    let error = run_error("1 / 0;");
    assert!(error.contains("Division by zero"), "{error}");
}

#[test]
fn comparisons() {
    assert_eq!(run_value("1 < 2;"), Object::Boolean(true));
    assert_eq!(run_value("1 > 2;"), Object::Boolean(false));
    assert_eq!(run_value("1 == 1;"), Object::Boolean(true));
    assert_eq!(run_value("1 != 2;"), Object::Boolean(true));
    assert_eq!(run_value("true == true;"), Object::Boolean(true));
    assert_eq!(run_value("true != false;"), Object::Boolean(true));
}

#[test]
fn prefix_operators() {
    assert_eq!(run_value("!true;"), Object::Boolean(false));
    assert_eq!(run_value("!0;"), Object::Boolean(true));
    assert_eq!(run_value("!5;"), Object::Boolean(false));
    assert_eq!(run_value("!!true;"), Object::Boolean(true));
    assert_eq!(run_value("-5;"), Object::Integer(-5));

    let error = run_error("-true;");
    assert!(error.contains("Unknown operator"), "{error}");
}

#[test]
fn string_operations() {
    assert_eq!(run_value(r#""foo" + "bar";"#),
               Object::Str("foobar".to_string()));

    let error = run_error(r#""a" - "b";"#);
    assert!(error.contains("Unknown operator"), "{error}");

    let error = run_error(r#"5 + "a";"#);
    assert!(error.contains("Type mismatch"), "{error}");
}

#[test]
fn if_expressions() {
    assert_eq!(run_value("if (1 < 2) { 10 } else { 20 }"), Object::Integer(10));
    assert_eq!(run_value("if (1 > 2) { 10 }"), Object::Null);
    assert_eq!(run_value("if (0) { 10 } else { 20 }"), Object::Integer(20));
    assert_eq!(run_value("if (3) { 10 }"), Object::Integer(10));
    assert_eq!(run_value(r#"if ("truthy by default") { 1 }"#), Object::Integer(1));
}

#[test]
fn let_bindings_and_identifiers() {
    assert_eq!(run_value("let a = 5; let b = a; b;"), Object::Integer(5));

    let error = run_error("foobar;");
    assert!(error.contains("Identifier not found: foobar"), "{error}");
}

#[test]
fn shadowing_never_mutates_the_outer_frame() {
    let source = "let x = 1; let f = fn() { let x = 2; x; }; f() + x;";
    assert_eq!(run_value(source), Object::Integer(3));
}

#[test]
fn closures_capture_their_defining_environment() {
    let source = "let adder = fn(x) { fn(y) { x + y } };\n\
                  let add2 = adder(2);\n\
                  add2(3);";
    assert_eq!(run_value(source), Object::Integer(5));
}

#[test]
fn captured_frames_are_shared_not_copied() {
    // the binding appears after the closure is created, in the same
    // frame the closure captured
    let source = "let f = fn() { x }; let x = 5; f();";
    assert_eq!(run_value(source), Object::Integer(5));
}

#[test]
fn recursion_through_the_global_frame() {
    let source = "let fact = fn(n) { if (n < 2) { 1 } else { n * fact(n - 1) } };\n\
                  fact(5);";
    assert_eq!(run_value(source), Object::Integer(120));
}

#[test]
fn return_short_circuits_blocks() {
    assert_eq!(run_value("let f = fn() { return 10; 20; }; f();"),
               Object::Integer(10));
    assert_eq!(run_value("return 5; 9;"), Object::Integer(5));
}

#[test]
fn the_last_block_value_is_the_implicit_return() {
    assert_eq!(run_value("let double = fn(x) { x * 2; }; double(4);"),
               Object::Integer(8));
}

#[test]
fn len_counts_characters() {
    assert_eq!(run_value(r#"len("hi");"#), Object::Integer(2));
    assert_eq!(run_value(r#"len("");"#), Object::Integer(0));
    assert_eq!(run_value(r#"len("foo" + "bar");"#), Object::Integer(6));
}

#[test]
fn len_rejects_bad_arguments() {
    let error = run_error("len(1);");
    assert!(error.contains("not supported by 'len'"), "{error}");

    let error = run_error(r#"len("a", "b");"#);
    assert!(error.contains("Wrong number of arguments"), "{error}");
}

#[test]
fn builtin_names_are_reserved() {
    let error = run_error("let len = 1;");
    assert!(error.contains("reserved"), "{error}");

    let error = run_error("let print = 1;");
    assert!(error.contains("reserved"), "{error}");
}

#[test]
fn print_appends_to_the_output_log() {
    let evaluation = run(r#"print("hello"); print(42); print(1 < 2);"#);
    assert_eq!(evaluation.output, vec!["hello", "42", "true"]);
    // print itself yields null, which is also the program's last value
    assert_eq!(evaluation.result, Object::Null);
}

#[test]
fn calling_a_non_closure_is_fatal() {
    let error = run_error("let x = 1; x(2);");
    assert!(error.contains("not callable"), "{error}");
}

#[test]
fn closure_calls_check_their_arity() {
    let error = run_error("let f = fn(a, b) { a; }; f(1);");
    assert!(error.contains("Wrong number of arguments"), "{error}");
}

#[test]
fn unresolved_identifiers_never_return_a_value() {
    let error = run_error("let f = fn() { missing }; f();");
    assert!(error.contains("Identifier not found: missing"), "{error}");
}
