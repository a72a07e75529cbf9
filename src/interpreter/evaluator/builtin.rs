use crate::{
    error::EvalError,
    interpreter::{evaluator::core::{EvalResult, Evaluator}, object::Object},
};

/// Type alias for built-in function handlers.
///
/// A built-in receives the evaluator (for the output log), the evaluated
/// argument values, and the call's source line.
type BuiltinFn = fn(&mut Evaluator, &[Object], usize) -> EvalResult<Object>;

/// Metadata for one built-in: its reserved name, its exact arity, and the
/// handler to run once the arity has been checked.
pub struct BuiltinDef {
    name:  &'static str,
    arity: usize,
    func:  BuiltinFn,
}

/// The built-in lookup table.
///
/// A call whose callee names one of these dispatches here before any user
/// binding is consulted; the names are also reserved, so a `let` can
/// never shadow them.
static BUILTIN_TABLE: &[BuiltinDef] = &[
    BuiltinDef { name: "len", arity: 1, func: len },
    BuiltinDef { name: "print", arity: 1, func: print },
];

/// The reserved built-in names.
pub const BUILTIN_FUNCTIONS: &[&str] = &["len", "print"];

/// Tests whether `name` is reserved for a built-in.
///
/// # Example
/// ```
/// use ember::interpreter::evaluator::builtin::is_reserved;
///
/// assert!(is_reserved("len"));
/// assert!(!is_reserved("length"));
/// ```
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

/// Looks a built-in up by name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|builtin| builtin.name == name)
}

impl BuiltinDef {
    /// Checks the arity and runs the handler.
    ///
    /// # Errors
    /// A wrong argument count is fatal; so is whatever the handler itself
    /// rejects.
    pub fn call(&self,
                evaluator: &mut Evaluator,
                arguments: &[Object],
                line: usize)
                -> EvalResult<Object> {
        if arguments.len() != self.arity {
            return Err(EvalError::WrongNumberOfArguments { callee:   self.name.to_string(),
                                                           expected: self.arity,
                                                           got:      arguments.len(),
                                                           line });
        }
        (self.func)(evaluator, arguments, line)
    }
}

/// Character count of a string, as an integer.
fn len(_: &mut Evaluator, arguments: &[Object], line: usize) -> EvalResult<Object> {
    match &arguments[0] {
        Object::Str(value) => {
            let count = i64::try_from(value.chars().count()).unwrap_or(i64::MAX);
            Ok(Object::Integer(count))
        },
        other => Err(EvalError::UnsupportedArgument { builtin: "len",
                                                      operand: other.type_name(),
                                                      line }),
    }
}

/// Appends the operand's human-readable form to the output log.
fn print(evaluator: &mut Evaluator, arguments: &[Object], _line: usize) -> EvalResult<Object> {
    evaluator.push_output(arguments[0].to_string());
    Ok(Object::Null)
}
