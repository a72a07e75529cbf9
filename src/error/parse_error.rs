use crate::interpreter::lexer::TokenKind;

#[derive(Debug)]
/// Represents all errors that can occur while parsing the token array.
pub enum ParseError {
    /// The next token was not the kind the grammar requires here.
    UnexpectedToken {
        /// The token kind the grammar expected.
        expected: TokenKind,
        /// The literal text of the token actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// No prefix parsing rule exists for the current token, so no
    /// expression can start here.
    NoPrefixRule {
        /// The literal text of the offending token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An integer literal token could not be converted to a 64-bit value.
    InvalidIntegerLiteral {
        /// The literal text that failed to convert.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found, line } => {
                write!(f,
                       "Error on line {line}: Expected next token to be {expected}, found '{found}'.")
            },
            Self::NoPrefixRule { token, line } => {
                write!(f, "Error on line {line}: No prefix parsing rule for '{token}'.")
            },
            Self::InvalidIntegerLiteral { literal, line } => {
                write!(f, "Error on line {line}: Could not parse '{literal}' as an integer.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
