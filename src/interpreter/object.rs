use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    ast::{BlockStatement, Identifier},
    interpreter::environment::Environment,
};

/// A runtime value produced by the evaluator.
///
/// The `Return` variant is a transient wrapper that only exists to
/// short-circuit block evaluation; it never ends up in a binding. A
/// `Closure` pairs a function body with the environment that was current
/// at its definition, which is what makes enclosing bindings reachable
/// after their scope's call has returned.
#[derive(Debug, Clone)]
pub enum Object {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A boolean.
    Boolean(bool),
    /// A string.
    Str(String),
    /// The absence of a value.
    Null,
    /// A value travelling up from a `return` statement.
    Return(Box<Object>),
    /// A function value with its defining environment.
    Closure(Closure),
}

/// A function value: parameters, body, and the environment captured by
/// reference at the definition site.
#[derive(Debug, Clone)]
pub struct Closure {
    /// Parameter names in declaration order.
    pub parameters: Vec<Identifier>,
    /// The function body.
    pub body:       BlockStatement,
    /// The environment that was current when the literal was evaluated.
    pub env:        Rc<RefCell<Environment>>,
}

impl Object {
    /// The type tag used in error messages and type checks.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::Boolean(_) => "BOOLEAN",
            Self::Str(_) => "STRING",
            Self::Null => "NULL",
            Self::Return(_) => "RETURN",
            Self::Closure(_) => "CLOSURE",
        }
    }

    /// Truthiness as used by conditions and logical negation.
    ///
    /// Integers are truthy iff nonzero, booleans carry their own value,
    /// `null` is always falsey, and every other kind is truthy by default.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(value) => *value != 0,
            Self::Boolean(value) => *value,
            Self::Null => false,
            _ => true,
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(l), Self::Integer(r)) => l == r,
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Str(l), Self::Str(r)) => l == r,
            (Self::Null, Self::Null) => true,
            (Self::Return(l), Self::Return(r)) => l == r,
            // Closures compare by identity of their defining environment
            // plus structural equality of the code.
            (Self::Closure(l), Self::Closure(r)) => {
                Rc::ptr_eq(&l.env, &r.env)
                && l.parameters == r.parameters
                && l.body == r.body
            },
            _ => false,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value}"),
            Self::Null => write!(f, "null"),
            Self::Return(value) => write!(f, "{value}"),
            Self::Closure(closure) => {
                let parameters = closure.parameters
                                        .iter()
                                        .map(ToString::to_string)
                                        .collect::<Vec<_>>()
                                        .join(", ");
                write!(f, "fn({parameters}) {{ {} }}", closure.body)
            },
        }
    }
}
