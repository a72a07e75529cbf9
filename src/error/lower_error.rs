#[derive(Debug)]
/// Represents all errors that can be raised while lowering to the IR.
pub enum LowerError {
    /// A `let` statement tried to bind a reserved built-in name.
    ReservedIdentifier {
        /// The reserved name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A name resolved against every enclosing function without a match.
    UnresolvedIdentifier {
        /// The unresolved name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A construct the IR has no representation for.
    Unsupported {
        /// What could not be lowered.
        construct: &'static str,
        /// The source line where the error occurred.
        line:      usize,
    },
}

impl std::fmt::Display for LowerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReservedIdentifier { name, line } => {
                write!(f,
                       "Error on line {line}: Invalid identifier name: '{name}' is reserved.")
            },
            Self::UnresolvedIdentifier { name, line } => {
                write!(f, "Error on line {line}: Identifier not found: {name}.")
            },
            Self::Unsupported { construct, line } => {
                write!(f, "Error on line {line}: {construct} cannot be lowered to IR.")
            },
        }
    }
}

impl std::error::Error for LowerError {}
