//! # ember
//!
//! ember is a small expression/statement language: integers, booleans,
//! strings, `let` bindings, `if`/`else`, and first-class functions with
//! lexical closures, plus the two built-ins `len` and `print`.
//!
//! One parse feeds two independent back ends. The tree-walking evaluator
//! executes the AST directly against a chain of shared environments and
//! collects an output log. The lowering pass translates the same AST into
//! a linear pseudo-assembly with explicit stack slots, virtual registers,
//! branches and closure-capture instructions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::match_same_arms,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::Error,
    interpreter::{evaluator::Evaluator, lexer::Lexer, object::Object, parser::Parser},
    ir::LoweredProgram,
};

/// Defines the structure of parsed code.
///
/// This module declares the statement and expression types that represent
/// source code as a tree. The AST is built by the parser, is immutable
/// afterward, and is traversed by both back ends. Every node renders
/// itself human-readably through `Display`.
pub mod ast;
/// Provides unified error types for every pipeline stage.
///
/// This module defines the errors that can be raised while lexing input
/// surfaces, parsing, evaluating, or lowering code, each carrying the
/// source line it occurred on, and the crate-level `Error` that unifies
/// them for the public entry points.
pub mod error;
/// The front end and the tree-walking back end.
///
/// This module ties together the lexer, the parser, the evaluator with
/// its environments and runtime objects, and the built-in functions.
pub mod interpreter;
/// The lowering back end.
///
/// This module translates the parsed program into pseudo-IR: one ordered
/// instruction list per function, with a free-variable analysis that
/// distinguishes local bindings from ones captured from enclosing
/// functions.
pub mod ir;

/// The outcome of evaluating a program: its final value and the output
/// log the run produced.
#[derive(Debug, PartialEq)]
pub struct Evaluation {
    /// The final value of the program.
    pub result: Object,
    /// The lines `print` appended, in order.
    pub output: Vec<String>,
}

/// Parses source text into a [`Program`].
///
/// # Errors
/// The first lexical or grammatical violation aborts parsing.
///
/// # Examples
/// ```
/// let program = ember::parse("let x = 5; x + 3;").unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// // A missing `=` is fatal; nothing is silently dropped.
/// assert!(ember::parse("let x 5;").is_err());
/// ```
pub fn parse(source: &str) -> Result<Program, Error> {
    let mut parser = Parser::new(Lexer::new(source));
    parser.parse_program()
}

/// Parses and evaluates source text.
///
/// # Errors
/// The first parse or evaluation error aborts the run.
///
/// # Examples
/// ```
/// use ember::interpreter::object::Object;
///
/// let evaluation = ember::run("let x = 5; x + 3;").unwrap();
/// assert_eq!(evaluation.result, Object::Integer(8));
///
/// let evaluation = ember::run(r#"print("hi");"#).unwrap();
/// assert_eq!(evaluation.output, vec!["hi"]);
/// ```
pub fn run(source: &str) -> Result<Evaluation, Error> {
    let program = parse(source)?;

    let mut evaluator = Evaluator::new();
    let result = evaluator.eval_program(&program)?;

    Ok(Evaluation { result,
                    output: evaluator.into_output() })
}

/// Parses and lowers source text to pseudo-IR.
///
/// # Errors
/// The first parse or lowering error aborts the pass.
///
/// # Examples
/// ```
/// let lowered = ember::lower("let x = 5;").unwrap();
/// assert!(lowered.to_string().starts_with("define @main() {"));
/// ```
pub fn lower(source: &str) -> Result<LoweredProgram, Error> {
    let program = parse(source)?;
    ir::lower_program(&program).map_err(Into::into)
}
