/// Core evaluation logic and environment management.
///
/// Contains the `Evaluator` itself: the dispatch over statement and
/// expression variants, block and program sequencing with return-value
/// bubbling, call frames, and the output log.
pub mod core;

/// Prefix operator evaluation.
///
/// Implements logical negation and arithmetic negation.
pub mod unary;

/// Infix operator evaluation.
///
/// Implements arithmetic and comparisons on integers, concatenation on
/// strings, and equality on the remaining kinds.
pub mod binary;

/// Built-in functions.
///
/// Defines the reserved built-ins (`len`, `print`), their dispatch table,
/// and the arity checks applied before a handler runs.
pub mod builtin;

pub use self::core::{EvalResult, Evaluator};
