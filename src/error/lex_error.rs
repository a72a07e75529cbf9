use crate::interpreter::lexer::Token;

#[derive(Debug)]
/// Represents the lexical failures an `Illegal` token can encode.
pub enum LexError {
    /// A string literal reached the end of input before its closing quote.
    UnterminatedString {
        /// The source line the string opened on.
        line: usize,
    },
    /// A character no lexical rule accepts.
    IllegalCharacter {
        /// The offending text.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl LexError {
    /// Decodes the failure an `Illegal` token carries.
    ///
    /// An illegal token whose literal opens with a double quote is an
    /// unterminated string; anything else is a character the token set
    /// cannot start.
    #[must_use]
    pub fn of_token(token: &Token) -> Self {
        if token.literal.starts_with('"') {
            Self::UnterminatedString { line: token.line }
        } else {
            Self::IllegalCharacter { found: token.literal.clone(),
                                     line:  token.line, }
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: Unterminated string literal.")
            },
            Self::IllegalCharacter { found, line } => {
                write!(f, "Error on line {line}: Unexpected character '{found}'.")
            },
        }
    }
}

impl std::error::Error for LexError {}
