/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a re-readable token
/// array, each token carrying its kind, literal text and source line.
/// This is the first stage of the pipeline.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind and
///   location, terminated by one `Eof` token.
/// - Encodes lexical failure in `Illegal` tokens instead of failing.
/// - Notifies an optional observer of every token and its byte span.
pub mod lexer;

/// The parser module builds the abstract syntax tree from tokens.
///
/// The parser consumes the token array produced by the lexer through a
/// current/peek token pair and constructs a `Program` with
/// operator-precedence expression parsing.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates the grammar, reporting the first violation with its line.
/// - Implements Pratt parsing with prefix and infix rules.
pub mod parser;

/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements
/// against a chain of shared environments, and collects the output log.
/// It is one of the two back ends over the parsed program.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Manages lexical scope chains and closure capture.
/// - Dispatches reserved built-ins before user bindings.
pub mod evaluator;

/// Lexical frames with shared ownership.
///
/// Declares the `Environment`: one scope's bindings plus the link to the
/// scope enclosing it, shared between closures and call frames.
pub mod environment;

/// The object module defines the runtime values of evaluation.
///
/// Declares the `Object` enum covering integers, booleans, strings,
/// `null`, in-flight return values and closures, together with type
/// names, truthiness and the human-readable rendering.
pub mod object;
