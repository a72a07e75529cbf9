use crate::{
    ast::PrefixOperator,
    error::EvalError,
    interpreter::{evaluator::core::{EvalResult, Evaluator}, object::Object},
};

impl Evaluator {
    /// Applies a prefix operator to an already-evaluated operand.
    ///
    /// `!` negates the operand's truthiness: booleans flip, `0` negates to
    /// `true` and any other integer to `false`, `null` negates to `true`,
    /// and every remaining kind is truthy by default so negates to
    /// `false`. `-` is defined on integers only.
    ///
    /// # Errors
    /// `-` applied to a non-integer operand is fatal.
    pub(crate) fn eval_prefix(operator: PrefixOperator,
                              right: &Object,
                              line: usize)
                              -> EvalResult<Object> {
        match operator {
            PrefixOperator::Not => Ok(Object::Boolean(!right.is_truthy())),
            PrefixOperator::Negate => match right {
                Object::Integer(value) => Ok(Object::Integer(value.wrapping_neg())),
                other => Err(EvalError::UnknownOperator { operator: "-".to_string(),
                                                         operand:  other.type_name(),
                                                         line }),
            },
        }
    }
}
