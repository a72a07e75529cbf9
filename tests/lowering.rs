use ember::ir;

fn lower(source: &str) -> String {
    ember::lower(source).unwrap_or_else(|e| panic!("Lowering failed: {e}"))
                        .to_string()
}

fn lower_error(source: &str) -> String {
    match ember::lower(source) {
        Ok(lowered) => panic!("Lowering succeeded but was expected to fail:\n{lowered}"),
        Err(e) => e.to_string(),
    }
}

#[test]
fn let_bound_integers_use_stack_slots() {
    assert_eq!(lower("let x = 5;"),
               "define @main() {\n\
                entry:\n  \
                %x = alloca\n  \
                store 5, %x\n\
                }");
}

#[test]
fn references_load_their_recorded_slot() {
    assert_eq!(lower("let x = 1; let y = x + 2;"),
               "define @main() {\n\
                entry:\n  \
                %x = alloca\n  \
                store 1, %x\n  \
                %y = alloca\n  \
                %0 = load %x\n  \
                %1 = load 2\n  \
                %2 = add %0, %1\n  \
                store %2, %y\n\
                }");
}

#[test]
fn booleans_lower_as_zero_or_one() {
    let text = lower("let t = true; let f = false;");
    assert!(text.contains("store 1, %t"), "{text}");
    assert!(text.contains("store 0, %f"), "{text}");
}

#[test]
fn strings_are_absent_from_the_ir() {
    assert_eq!(lower("let s = \"hi\";"), "define @main() {\nentry:\n}");
}

#[test]
fn comparisons_widen_back_to_integers() {
    let text = lower("let a = 1 < 2;");
    assert!(text.contains("%2 = icmp sle %0, %1"), "{text}");
    assert!(text.contains("%3 = zext %2 to i32"), "{text}");

    let text = lower("let a = 1 > 2;");
    assert!(text.contains("icmp sge"), "{text}");

    let text = lower("let a = 1 == 2;");
    assert!(text.contains("icmp eq"), "{text}");

    let text = lower("let a = 1 != 2;");
    assert!(text.contains("icmp ne"), "{text}");
}

#[test]
fn unary_operators_lower_symmetrically() {
    assert_eq!(lower("let a = 1; let b = -a; let c = !a;"),
               "define @main() {\n\
                entry:\n  \
                %a = alloca\n  \
                store 1, %a\n  \
                %b = alloca\n  \
                %0 = load %a\n  \
                %1 = sub 0, %0\n  \
                store %1, %b\n  \
                %c = alloca\n  \
                %2 = load %a\n  \
                %3 = icmp eq %2, 0\n  \
                %4 = zext %3 to i32\n  \
                store %4, %c\n\
                }");
}

#[test]
fn if_lowering_emits_both_labels_and_the_end_target() {
    assert_eq!(lower("let x = 1; if (x < 2) { let y = 10; } else { let y = 20; }"),
               "define @main() {\n\
                entry:\n  \
                %x = alloca\n  \
                store 1, %x\n  \
                %0 = load %x\n  \
                %1 = load 2\n  \
                %2 = icmp sle %0, %1\n  \
                %3 = zext %2 to i32\n  \
                br i1 %3, label %if, label %else\n\
                if:\n  \
                %y = alloca\n  \
                store 10, %y\n  \
                br label %end\n\
                else:\n  \
                %y = alloca\n  \
                store 20, %y\n  \
                br label %end\n\
                end:\n\
                }");
}

#[test]
fn if_without_alternative_still_has_branch_targets() {
    let text = lower("let x = 1; if (x == 0) { let y = 1; }");
    assert!(text.contains("br i1 %3, label %if, label %else"), "{text}");
    assert!(text.contains("else:\n  br label %end\nend:"), "{text}");
}

#[test]
fn closures_capture_free_variables() {
    assert_eq!(lower("let x = 5;\nlet add = fn(a) { return a + x; };\nlet y = add(3);"),
               "define @main() {\n\
                entry:\n  \
                %x = alloca\n  \
                store 5, %x\n  \
                %0 = create-closure @add, [x]\n  \
                %add = alloca\n  \
                store %0, %add\n  \
                %y = alloca\n  \
                %1 = call @add(i32 3)\n  \
                store %1, %y\n\
                }\n\
                \n\
                define @add(i32 %a) {\n\
                entry:\n  \
                %0 = load %a\n  \
                %1 = load-free x\n  \
                %2 = add %0, %1\n  \
                ret %2\n\
                }");
}

#[test]
fn capture_propagates_through_nested_functions() {
    let text = lower("let x = 1; let outer = fn() { let inner = fn() { return x; }; return 0; };");

    assert_eq!(text,
               "define @main() {\n\
                entry:\n  \
                %x = alloca\n  \
                store 1, %x\n  \
                %0 = create-closure @outer, [x]\n  \
                %outer = alloca\n  \
                store %0, %outer\n\
                }\n\
                \n\
                define @outer() {\n\
                entry:\n  \
                %0 = create-closure @inner, [x]\n  \
                %inner = alloca\n  \
                store %0, %inner\n  \
                ret 0\n\
                }\n\
                \n\
                define @inner() {\n\
                entry:\n  \
                %0 = load-free x\n  \
                ret %0\n\
                }");
}

#[test]
fn call_arguments_carry_type_tags() {
    let text = lower("let a = 1; let f = fn(n) { return n; }; let r = f(a);");
    assert!(text.contains("%1 = call @f(i32 %a)"), "{text}");

    let text = lower("let s = 1; print(s);");
    assert!(text.contains("%0 = call @print(i32 %s)"), "{text}");
}

#[test]
fn registers_are_scoped_per_function() {
    let text = lower("let x = 1; let f = fn(a) { return a + 1; }; let y = x + 2;");
    // both main and @f start counting registers from %0
    assert!(text.contains("define @f(i32 %a) {\nentry:\n  %0 = load %a"), "{text}");
    assert!(text.contains("%1 = load %x"), "{text}");
}

#[test]
fn lowering_twice_is_byte_identical() {
    let source = "let x = 5;\nlet add = fn(a) { return a + x; };\nlet y = add(3);\n\
                  if (y > 2) { let z = 1; } else { let z = 2; }";
    let program = ember::parse(source).unwrap();

    let first = ir::lower_program(&program).unwrap().to_string();
    let second = ir::lower_program(&program).unwrap().to_string();
    assert_eq!(first, second);
}

#[test]
fn reserved_names_are_rejected_before_lowering() {
    let error = lower_error("let len = 1;");
    assert!(error.contains("reserved"), "{error}");

    let error = lower_error("let print = fn(a) { return a; };");
    assert!(error.contains("reserved"), "{error}");
}

#[test]
fn unresolved_names_are_fatal() {
    let error = lower_error("let y = x;");
    assert!(error.contains("Identifier not found: x"), "{error}");
}

#[test]
fn constructs_without_an_ir_form_are_fatal() {
    let error = lower_error("fn(x) { x; };");
    assert!(error.contains("function literal outside a let binding"), "{error}");

    let error = lower_error("let f = fn() { return \"s\"; };");
    assert!(error.contains("a string expression"), "{error}");

    let error = lower_error("let x = if (1) { 2 };");
    assert!(error.contains("if expression in value position"), "{error}");
}
