/// Core parser state and statement parsing.
///
/// Holds the `Parser` struct with its current/peek token pair, the
/// statement dispatcher, and the expect-peek machinery that makes every
/// structural violation fatal.
pub mod core;

/// Operator-precedence expression parsing.
///
/// Implements the Pratt loop: prefix dispatch on the current token,
/// followed by infix folding while the peeked operator binds tighter than
/// the surrounding context.
pub mod expression;

pub use self::core::{ParseResult, Parser};
pub use self::expression::Precedence;
