#[derive(Debug)]
/// Represents all errors that can be raised during evaluation.
pub enum EvalError {
    /// A name resolved against the whole environment chain without a match.
    UnknownIdentifier {
        /// The unresolved name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The two operands of an infix operator have different types.
    TypeMismatch {
        /// Type of the left operand.
        left:  &'static str,
        /// Type of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The operator is not defined for the operand type it was given.
    UnknownOperator {
        /// The operator text.
        operator: String,
        /// The operand type it was applied to.
        operand:  &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Integer division with a zero divisor.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `let` statement tried to bind a reserved built-in name.
    ReservedIdentifier {
        /// The reserved name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call supplied the wrong number of arguments.
    WrongNumberOfArguments {
        /// What was being called.
        callee:   String,
        /// How many arguments it takes.
        expected: usize,
        /// How many arguments were supplied.
        got:      usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A built-in was applied to an operand type it does not support.
    UnsupportedArgument {
        /// The built-in's name.
        builtin: &'static str,
        /// The operand type supplied.
        operand: &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The callee of a call expression did not evaluate to a closure.
    NotCallable {
        /// The type of the value that was called.
        operand: &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownIdentifier { name, line } => {
                write!(f, "Error on line {line}: Identifier not found: {name}.")
            },
            Self::TypeMismatch { left, right, line } => {
                write!(f, "Error on line {line}: Type mismatch: {left} and {right}.")
            },
            Self::UnknownOperator { operator, operand, line } => {
                write!(f,
                       "Error on line {line}: Unknown operator '{operator}' for {operand} operands.")
            },
            Self::DivisionByZero { line } => {
                write!(f, "Error on line {line}: Division by zero.")
            },
            Self::ReservedIdentifier { name, line } => {
                write!(f,
                       "Error on line {line}: Invalid identifier name: '{name}' is reserved.")
            },
            Self::WrongNumberOfArguments { callee,
                                           expected,
                                           got,
                                           line, } => {
                write!(f,
                       "Error on line {line}: Wrong number of arguments to {callee}: expected {expected}, got {got}.")
            },
            Self::UnsupportedArgument { builtin, operand, line } => {
                write!(f,
                       "Error on line {line}: Argument of type {operand} is not supported by '{builtin}'.")
            },
            Self::NotCallable { operand, line } => {
                write!(f, "Error on line {line}: Value of type {operand} is not callable.")
            },
        }
    }
}

impl std::error::Error for EvalError {}
