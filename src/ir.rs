/// The pseudo-assembly instruction set.
///
/// Declares the typed opcodes and their textual surface forms. The
/// rendered text is the system's boundary format toward any hypothetical
/// native backend.
pub mod instruction;

/// Per-function lowering state.
///
/// Holds the virtual-register counter and the local/captured partitions
/// of the name map, plus the scope stack that classifies references as
/// local or free.
pub mod scope;

/// AST-to-IR translation.
///
/// Walks the same AST the evaluator consumes and produces an ordered
/// instruction list per function, including the implicit `main` for
/// top-level statements.
pub mod lower;

pub use instruction::{BinaryOp, Instruction, Operand, Predicate};
pub use lower::{lower_program, LoweredFunction, LoweredProgram};
pub use scope::{FunctionScope, Resolution, ScopeStack};
