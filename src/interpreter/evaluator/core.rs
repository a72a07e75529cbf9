use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{BlockStatement, Expression, Identifier, Program, Statement},
    error::EvalError,
    interpreter::{
        environment::Environment,
        evaluator::builtin,
        object::{Closure, Object},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure. Every failure is fatal and unwinds
/// the whole evaluation; there is no internal recovery channel.
pub type EvalResult<T> = Result<T, EvalError>;

/// The tree-walking, big-step interpreter.
///
/// Execution runs over a chain of shared environments rooted at one
/// global frame. The evaluator also owns the output log: an append-only
/// sequence of human-readable lines fed by the `print` built-in and
/// exposed read-only after a run.
///
/// # Example
/// ```
/// use ember::interpreter::{evaluator::Evaluator, lexer::Lexer,
///                          object::Object, parser::Parser};
///
/// let mut parser = Parser::new(Lexer::new("let x = 5; x + 3;"));
/// let program = parser.parse_program().unwrap();
///
/// let mut evaluator = Evaluator::new();
/// let result = evaluator.eval_program(&program).unwrap();
///
/// assert_eq!(result, Object::Integer(8));
/// ```
pub struct Evaluator {
    env:    Rc<RefCell<Environment>>,
    output: Vec<String>,
}

#[allow(clippy::new_without_default)]
impl Evaluator {
    /// Creates an evaluator with one fresh global environment and an
    /// empty output log.
    #[must_use]
    pub fn new() -> Self {
        Self { env:    Environment::global(),
               output: Vec::new(), }
    }

    /// Evaluates a whole program.
    ///
    /// Statements run in order. A `return` value travelling up from a
    /// top-level statement is unwrapped here and ends the run; otherwise
    /// the result is the last statement's value (`null` for an empty
    /// program).
    ///
    /// # Errors
    /// The first evaluation error aborts the run.
    pub fn eval_program(&mut self, program: &Program) -> EvalResult<Object> {
        let mut result = Object::Null;

        for statement in &program.statements {
            match self.eval_statement(statement)? {
                Object::Return(value) => return Ok(*value),
                value => result = value,
            }
        }

        Ok(result)
    }

    /// Evaluates a single statement.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Object> {
        match statement {
            Statement::Let { name, value, .. } => {
                // Built-in names can never be shadowed; reject before
                // touching the right-hand side.
                if builtin::is_reserved(&name.value) {
                    return Err(EvalError::ReservedIdentifier { name: name.value.clone(),
                                                               line: name.token.line, });
                }

                let value = self.eval_expression(value)?;
                self.env.borrow_mut().set(name.value.clone(), value.clone());
                Ok(value)
            },
            Statement::Return { value, .. } => {
                let value = self.eval_expression(value)?;
                Ok(Object::Return(Box::new(value)))
            },
            Statement::Expression { expression, .. } => self.eval_expression(expression),
        }
    }

    /// Evaluates an expression, dispatching on its variant.
    pub fn eval_expression(&mut self, expression: &Expression) -> EvalResult<Object> {
        match expression {
            Expression::Integer { value, .. } => Ok(Object::Integer(*value)),
            Expression::Boolean { value, .. } => Ok(Object::Boolean(*value)),
            Expression::Str { value, .. } => Ok(Object::Str(value.clone())),
            Expression::Identifier(identifier) => self.eval_identifier(identifier),
            Expression::Prefix { token, operator, right } => {
                let right = self.eval_expression(right)?;
                Self::eval_prefix(*operator, &right, token.line)
            },
            Expression::Infix { token,
                                left,
                                operator,
                                right, } => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                Self::eval_infix(*operator, &left, &right, token.line)
            },
            Expression::If { condition,
                             consequence,
                             alternative,
                             .. } => {
                let condition = self.eval_expression(condition)?;
                if condition.is_truthy() {
                    self.eval_block(consequence)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative)
                } else {
                    Ok(Object::Null)
                }
            },
            Expression::Function { parameters, body, .. } => {
                // The current frame is captured by reference, not copied:
                // bindings added to it later stay visible to the closure.
                Ok(Object::Closure(Closure { parameters: parameters.clone(),
                                             body:       body.clone(),
                                             env:        Rc::clone(&self.env), }))
            },
            Expression::Call { token,
                               function,
                               arguments, } => {
                self.eval_call(function, arguments, token.line)
            },
        }
    }

    /// Evaluates the statements of a block in order.
    ///
    /// Evaluation stops at the first `return` value and hands it up
    /// unmodified; it keeps bubbling until a call expression or the
    /// program unwraps it.
    pub(crate) fn eval_block(&mut self, block: &BlockStatement) -> EvalResult<Object> {
        let mut result = Object::Null;

        for statement in &block.statements {
            result = self.eval_statement(statement)?;
            if matches!(result, Object::Return(_)) {
                return Ok(result);
            }
        }

        Ok(result)
    }

    /// Resolves an identifier against the environment chain.
    fn eval_identifier(&mut self, identifier: &Identifier) -> EvalResult<Object> {
        self.env
            .borrow()
            .get(&identifier.value)
            .ok_or_else(|| EvalError::UnknownIdentifier { name: identifier.value.clone(),
                                                          line: identifier.token.line, })
    }

    /// Evaluates a call expression.
    ///
    /// A callee naming a built-in dispatches to it directly, bypassing
    /// user bindings. Otherwise the callee must evaluate to a closure;
    /// arguments are evaluated left to right (stopping at the first
    /// error), bound positionally in a fresh frame enclosed by the
    /// closure's defining environment, and the body runs in that frame.
    /// The caller's environment is restored regardless of the outcome.
    fn eval_call(&mut self,
                 function: &Expression,
                 arguments: &[Expression],
                 line: usize)
                 -> EvalResult<Object> {
        if let Expression::Identifier(identifier) = function
           && let Some(builtin) = builtin::lookup(&identifier.value)
        {
            let arguments = self.eval_expressions(arguments)?;
            return builtin.call(self, &arguments, line);
        }

        let callee = self.eval_expression(function)?;
        let closure = match callee {
            Object::Closure(closure) => closure,
            other => {
                return Err(EvalError::NotCallable { operand: other.type_name(),
                                                    line });
            },
        };

        let arguments = self.eval_expressions(arguments)?;
        if arguments.len() != closure.parameters.len() {
            return Err(EvalError::WrongNumberOfArguments { callee:   function.to_string(),
                                                           expected: closure.parameters.len(),
                                                           got:      arguments.len(),
                                                           line });
        }

        let frame = Environment::enclosed(Rc::clone(&closure.env));
        for (parameter, argument) in closure.parameters.iter().zip(arguments) {
            frame.borrow_mut().set(parameter.value.clone(), argument);
        }

        let saved = std::mem::replace(&mut self.env, frame);
        let result = self.eval_block(&closure.body);
        self.env = saved;

        // An explicit `return` unwraps here; otherwise the block's last
        // value is the implicit return.
        match result? {
            Object::Return(value) => Ok(*value),
            value => Ok(value),
        }
    }

    /// Evaluates expressions left to right, short-circuiting on the first
    /// error.
    fn eval_expressions(&mut self, expressions: &[Expression]) -> EvalResult<Vec<Object>> {
        expressions.iter()
                   .map(|expression| self.eval_expression(expression))
                   .collect()
    }

    /// The output log collected so far.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Consumes the evaluator, handing the output log over.
    #[must_use]
    pub fn into_output(self) -> Vec<String> {
        self.output
    }

    /// Appends one line to the output log.
    pub(crate) fn push_output(&mut self, line: String) {
        self.output.push(line);
    }
}
