use crate::{
    ast::InfixOperator,
    error::EvalError,
    interpreter::{evaluator::core::{EvalResult, Evaluator}, object::Object},
};

impl Evaluator {
    /// Applies an infix operator to two already-evaluated operands.
    ///
    /// Integer pairs get the full arithmetic and comparison set, string
    /// pairs get concatenation, and any other same-typed pair supports
    /// `==`/`!=` by comparing the wrapped values directly. Operands of
    /// different types never combine.
    ///
    /// # Errors
    /// A type mismatch or an operator undefined for the operand types is
    /// fatal.
    pub(crate) fn eval_infix(operator: InfixOperator,
                             left: &Object,
                             right: &Object,
                             line: usize)
                             -> EvalResult<Object> {
        match (left, right) {
            (Object::Integer(l), Object::Integer(r)) => {
                Self::eval_integer_infix(operator, *l, *r, line)
            },
            (Object::Str(l), Object::Str(r)) => {
                Self::eval_string_infix(operator, l, r, line)
            },
            (l, r) if l.type_name() != r.type_name() => {
                Err(EvalError::TypeMismatch { left:  l.type_name(),
                                              right: r.type_name(),
                                              line })
            },
            (l, r) => match operator {
                InfixOperator::Eq => Ok(Object::Boolean(l == r)),
                InfixOperator::NotEq => Ok(Object::Boolean(l != r)),
                _ => Err(EvalError::UnknownOperator { operator: operator.to_string(),
                                                      operand:  l.type_name(),
                                                      line }),
            },
        }
    }

    /// Integer arithmetic yields integers; comparisons yield booleans.
    fn eval_integer_infix(operator: InfixOperator,
                          left: i64,
                          right: i64,
                          line: usize)
                          -> EvalResult<Object> {
        let object = match operator {
            InfixOperator::Add => Object::Integer(left.wrapping_add(right)),
            InfixOperator::Sub => Object::Integer(left.wrapping_sub(right)),
            InfixOperator::Mul => Object::Integer(left.wrapping_mul(right)),
            InfixOperator::Div => {
                if right == 0 {
                    return Err(EvalError::DivisionByZero { line });
                }
                Object::Integer(left.wrapping_div(right))
            },
            InfixOperator::Eq => Object::Boolean(left == right),
            InfixOperator::NotEq => Object::Boolean(left != right),
            InfixOperator::Lt => Object::Boolean(left < right),
            InfixOperator::Gt => Object::Boolean(left > right),
        };

        Ok(object)
    }

    /// `+` concatenates; no other string operator is defined.
    fn eval_string_infix(operator: InfixOperator,
                         left: &str,
                         right: &str,
                         line: usize)
                         -> EvalResult<Object> {
        match operator {
            InfixOperator::Add => Ok(Object::Str(format!("{left}{right}"))),
            _ => Err(EvalError::UnknownOperator { operator: operator.to_string(),
                                                  operand:  "STRING",
                                                  line }),
        }
    }
}
