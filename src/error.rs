/// Lexical errors.
///
/// The lexer itself never fails; malformed input is encoded as an
/// `Illegal` token. These errors are raised by the parser when such a
/// token reaches it, naming the underlying lexical problem.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the AST from the
/// token array: missing or unexpected tokens at grammar points, tokens
/// with no parsing rule, and invalid integer literals.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while the tree-walking
/// evaluator executes a program: unresolved identifiers, type mismatches,
/// unsupported operators, and built-in misuse.
pub mod eval_error;
/// Lowering errors.
///
/// Defines the error types raised while translating the AST into the
/// pseudo-IR: reserved or unresolved names, and constructs the IR has no
/// representation for.
pub mod lower_error;

pub use eval_error::EvalError;
pub use lex_error::LexError;
pub use lower_error::LowerError;
pub use parse_error::ParseError;

/// Any error the pipeline can surface.
///
/// Each stage has its own error enum; this type unifies them for the
/// public entry points. Every failure is fatal for the unit of work in
/// progress: the stage aborts and the error reaches the caller, which
/// decides whether to stop or continue with the next independent input.
#[derive(Debug)]
pub enum Error {
    /// An illegal token surfaced while parsing.
    Lex(LexError),
    /// The token stream violated the grammar.
    Parse(ParseError),
    /// The program failed while being evaluated.
    Eval(EvalError),
    /// The program could not be lowered to IR.
    Lower(LowerError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Eval(e) => write!(f, "{e}"),
            Self::Lower(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Eval(e) => Some(e),
            Self::Lower(e) => Some(e),
        }
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<EvalError> for Error {
    fn from(e: EvalError) -> Self {
        Self::Eval(e)
    }
}

impl From<LowerError> for Error {
    fn from(e: LowerError) -> Self {
        Self::Lower(e)
    }
}
