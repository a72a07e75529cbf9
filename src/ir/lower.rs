use std::fmt;

use crate::{
    ast::{BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program,
          Statement},
    error::LowerError,
    interpreter::evaluator::builtin,
    ir::{
        instruction::{BinaryOp, Instruction, Operand, Predicate},
        scope::{Resolution, ScopeStack},
    },
};

/// Result type used by the lowerer.
pub type LowerResult<T> = Result<T, LowerError>;

/// One lowered function: its symbol, its parameters, and its ordered
/// instruction list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweredFunction {
    /// The function symbol, without the `@` sigil.
    pub name:         String,
    /// Parameter names; each becomes a pre-bound `%name` register.
    pub params:       Vec<String>,
    /// The instructions of the function body, in emission order.
    pub instructions: Vec<Instruction>,
}

/// The lowered program: one function per `let`-bound function literal,
/// preceded by the implicit `main` that holds the top-level statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweredProgram {
    /// The functions in definition order, `main` first.
    pub functions: Vec<LoweredFunction>,
}

impl fmt::Display for LoweredFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.params
                         .iter()
                         .map(|param| format!("i32 %{param}"))
                         .collect::<Vec<_>>()
                         .join(", ");
        writeln!(f, "define @{}({params}) {{", self.name)?;
        writeln!(f, "entry:")?;
        for instruction in &self.instructions {
            match instruction {
                Instruction::Label(_) => writeln!(f, "{instruction}")?,
                _ => writeln!(f, "  {instruction}")?,
            }
        }
        write!(f, "}}")
    }
}

impl fmt::Display for LoweredProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let functions = self.functions
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join("\n\n");
        write!(f, "{functions}")
    }
}

/// Lowers a program to pseudo-IR.
///
/// Every invocation builds fresh lowering state, so lowering the same
/// program twice produces byte-identical text.
///
/// # Errors
/// The first reserved or unresolved name, or construct the IR cannot
/// represent, aborts the pass.
///
/// # Example
/// ```
/// use ember::interpreter::{lexer::Lexer, parser::Parser};
///
/// let mut parser = Parser::new(Lexer::new("let x = 5;"));
/// let program = parser.parse_program().unwrap();
///
/// let lowered = ember::ir::lower_program(&program).unwrap();
/// let text = lowered.to_string();
///
/// assert!(text.contains("%x = alloca"));
/// assert!(text.contains("store 5, %x"));
/// ```
pub fn lower_program(program: &Program) -> LowerResult<LoweredProgram> {
    let mut lowerer = Lowerer::new();

    for statement in &program.statements {
        lowerer.lower_statement(statement)?;
    }

    Ok(LoweredProgram { functions: lowerer.functions })
}

/// The lowering state for one invocation.
///
/// `active` tracks which function instructions are currently being
/// emitted into; it grows and shrinks with the scope stack as nested
/// function definitions are entered and left.
struct Lowerer {
    functions: Vec<LoweredFunction>,
    scopes:    ScopeStack,
    active:    Vec<usize>,
}

impl Lowerer {
    fn new() -> Self {
        let main = LoweredFunction { name:         "main".to_string(),
                                     params:       Vec::new(),
                                     instructions: Vec::new(), };
        Self { functions: vec![main],
               scopes:    ScopeStack::new(),
               active:    vec![0], }
    }

    /// Appends an instruction to the function currently being lowered.
    fn emit(&mut self, instruction: Instruction) {
        let index = self.active.last().copied().unwrap_or(0);
        self.functions[index].instructions.push(instruction);
    }

    fn fresh_register(&mut self) -> String {
        self.scopes.current_mut().fresh_register()
    }

    fn lower_statement(&mut self, statement: &Statement) -> LowerResult<()> {
        match statement {
            Statement::Let { name, value, .. } => self.lower_let(name, value),
            Statement::Return { value, token } => self.lower_return(value, token.line),
            Statement::Expression { expression, .. } => {
                self.lower_expression_statement(expression)
            },
        }
    }

    /// Lowers a `let` binding.
    ///
    /// Function literals become named function definitions plus a
    /// `create-closure`; strings have no IR representation and vanish;
    /// everything else lowers its right-hand side to a register or
    /// literal, allocates a stack slot, and stores into it. The slot is
    /// recorded as the name's binding so subsequent references reuse it.
    fn lower_let(&mut self, name: &Identifier, value: &Expression) -> LowerResult<()> {
        if builtin::is_reserved(&name.value) {
            return Err(LowerError::ReservedIdentifier { name: name.value.clone(),
                                                        line: name.token.line, });
        }

        match value {
            Expression::Function { parameters, body, .. } => {
                self.lower_function(name, parameters, body)
            },
            Expression::Str { .. } => Ok(()),
            _ => {
                self.emit(Instruction::Alloca { slot: name.value.clone() });
                let operand = self.lower_value(value)?;
                self.emit(Instruction::Store { value: operand,
                                               slot:  name.value.clone(), });
                self.scopes.current_mut().bind_local(&name.value);
                Ok(())
            },
        }
    }

    /// Lowers a `let`-bound function literal.
    ///
    /// The body is lowered into its own function (and scope) with every
    /// parameter pre-bound as a `%name` register. The names the body
    /// resolved from enclosing functions are the closure's free
    /// variables; the enclosing function then materializes the closure
    /// with `create-closure` and stores it into a fresh stack slot.
    fn lower_function(&mut self,
                      name: &Identifier,
                      parameters: &[Identifier],
                      body: &BlockStatement)
                      -> LowerResult<()> {
        let index = self.functions.len();
        let params = parameters.iter()
                               .map(|parameter| parameter.value.clone())
                               .collect();
        self.functions.push(LoweredFunction { name: name.value.clone(),
                                              params,
                                              instructions: Vec::new() });

        self.scopes.push();
        for parameter in parameters {
            self.scopes.current_mut().bind_local(&parameter.value);
        }

        self.active.push(index);
        for statement in &body.statements {
            self.lower_statement(statement)?;
        }
        self.active.pop();

        let free = self.scopes.pop().into_captured();
        // A free variable this closure forwards may itself come from a
        // function further out; re-resolving it here propagates the
        // capture through the enclosing scope.
        for name in &free {
            let _ = self.scopes.resolve(name);
        }

        let dest = self.fresh_register();
        self.emit(Instruction::CreateClosure { dest:     dest.clone(),
                                               function: name.value.clone(),
                                               free });
        self.emit(Instruction::Alloca { slot: name.value.clone() });
        self.emit(Instruction::Store { value: Operand::Register(dest),
                                       slot:  name.value.clone(), });
        self.scopes.current_mut().bind_local(&name.value);
        Ok(())
    }

    /// Lowers a `return` statement.
    ///
    /// Integer and boolean literals return directly; identifier, prefix,
    /// infix and call expressions are lowered to a register first.
    fn lower_return(&mut self, value: &Expression, _line: usize) -> LowerResult<()> {
        let operand = match value {
            Expression::Integer { value, .. } => Operand::Literal(*value),
            Expression::Boolean { value, .. } => Operand::Literal(i64::from(*value)),
            other => Operand::Register(self.materialize(other)?),
        };
        self.emit(Instruction::Ret { value: operand });
        Ok(())
    }

    /// Lowers an expression in statement position.
    ///
    /// Bare literals and names have no effect and emit nothing. An `if`
    /// is only meaningful here, since it produces no value in the IR.
    fn lower_expression_statement(&mut self, expression: &Expression) -> LowerResult<()> {
        match expression {
            Expression::Integer { .. }
            | Expression::Boolean { .. }
            | Expression::Str { .. }
            | Expression::Identifier(_) => Ok(()),
            Expression::If { condition,
                             consequence,
                             alternative,
                             .. } => {
                self.lower_if(condition, consequence, alternative.as_ref())
            },
            Expression::Prefix { .. } | Expression::Infix { .. } | Expression::Call { .. } => {
                self.materialize(expression)?;
                Ok(())
            },
            Expression::Function { token, .. } => {
                Err(LowerError::Unsupported { construct: "a function literal outside a let binding",
                                              line:      token.line, })
            },
        }
    }

    /// Lowers an `if` expression.
    ///
    /// The condition materializes to a register and branches to the
    /// `if`/`else` labels; both arms branch on to `end`. The `else` and
    /// `end` labels are emitted even without an alternative so every
    /// branch has a target.
    fn lower_if(&mut self,
                condition: &Expression,
                consequence: &BlockStatement,
                alternative: Option<&BlockStatement>)
                -> LowerResult<()> {
        let condition = self.materialize(condition)?;
        self.emit(Instruction::CondBr { condition,
                                        then_label: "if".to_string(),
                                        else_label: "else".to_string(), });

        self.emit(Instruction::Label("if".to_string()));
        self.lower_block(consequence)?;
        self.emit(Instruction::Br { label: "end".to_string() });

        self.emit(Instruction::Label("else".to_string()));
        if let Some(alternative) = alternative {
            self.lower_block(alternative)?;
        }
        self.emit(Instruction::Br { label: "end".to_string() });

        self.emit(Instruction::Label("end".to_string()));
        Ok(())
    }

    fn lower_block(&mut self, block: &BlockStatement) -> LowerResult<()> {
        for statement in &block.statements {
            self.lower_statement(statement)?;
        }
        Ok(())
    }

    /// Lowers a `let` right-hand side to a register or literal.
    fn lower_value(&mut self, expression: &Expression) -> LowerResult<Operand> {
        match expression {
            Expression::Integer { value, .. } => Ok(Operand::Literal(*value)),
            Expression::Boolean { value, .. } => Ok(Operand::Literal(i64::from(*value))),
            other => Ok(Operand::Register(self.materialize(other)?)),
        }
    }

    /// Materializes an expression into a fresh register.
    ///
    /// Literals load themselves, identifiers load their slot (or emit
    /// the free-variable form), and compound expressions lower
    /// recursively.
    fn materialize(&mut self, expression: &Expression) -> LowerResult<String> {
        match expression {
            Expression::Integer { value, .. } => {
                let dest = self.fresh_register();
                self.emit(Instruction::Load { dest:  dest.clone(),
                                              value: Operand::Literal(*value), });
                Ok(dest)
            },
            Expression::Boolean { value, .. } => {
                let dest = self.fresh_register();
                self.emit(Instruction::Load { dest:  dest.clone(),
                                              value: Operand::Literal(i64::from(*value)), });
                Ok(dest)
            },
            Expression::Identifier(identifier) => self.materialize_identifier(identifier),
            Expression::Prefix { operator, right, token } => {
                self.lower_prefix(*operator, right, token.line)
            },
            Expression::Infix { operator, left, right, .. } => {
                self.lower_infix(*operator, left, right)
            },
            Expression::Call { token,
                               function,
                               arguments, } => {
                self.lower_call(function, arguments, token.line)
            },
            Expression::Str { token, .. } => {
                Err(LowerError::Unsupported { construct: "a string expression",
                                              line:      token.line, })
            },
            Expression::If { token, .. } => {
                Err(LowerError::Unsupported { construct: "an if expression in value position",
                                              line:      token.line, })
            },
            Expression::Function { token, .. } => {
                Err(LowerError::Unsupported { construct: "a function literal outside a let binding",
                                              line:      token.line, })
            },
        }
    }

    /// Loads an identifier: `load` from its slot when local, `load-free`
    /// when captured from an enclosing function.
    fn materialize_identifier(&mut self, identifier: &Identifier) -> LowerResult<String> {
        let resolution = self.resolve(identifier)?;
        let dest = self.fresh_register();
        match resolution {
            Resolution::Local => {
                self.emit(Instruction::Load { dest:  dest.clone(),
                                              value: Operand::Register(identifier.value
                                                                                 .clone()), });
            },
            Resolution::Captured => {
                self.emit(Instruction::LoadFree { dest: dest.clone(),
                                                  name: identifier.value.clone(), });
            },
        }
        Ok(dest)
    }

    fn resolve(&mut self, identifier: &Identifier) -> LowerResult<Resolution> {
        self.scopes
            .resolve(&identifier.value)
            .ok_or_else(|| LowerError::UnresolvedIdentifier { name: identifier.value.clone(),
                                                              line: identifier.token.line, })
    }

    /// Lowers a prefix operation.
    ///
    /// `-` negates by subtracting from zero. `!` compares against zero
    /// and widens, the mirror image of how comparisons materialize.
    fn lower_prefix(&mut self,
                    operator: PrefixOperator,
                    right: &Expression,
                    _line: usize)
                    -> LowerResult<String> {
        let operand = self.materialize(right)?;
        match operator {
            PrefixOperator::Negate => {
                let dest = self.fresh_register();
                self.emit(Instruction::Binary { dest:  dest.clone(),
                                                op:    BinaryOp::Sub,
                                                left:  Operand::Literal(0),
                                                right: Operand::Register(operand), });
                Ok(dest)
            },
            PrefixOperator::Not => {
                let compared = self.fresh_register();
                self.emit(Instruction::Icmp { dest:      compared.clone(),
                                              predicate: Predicate::Eq,
                                              left:      Operand::Register(operand),
                                              right:     Operand::Literal(0), });
                let dest = self.fresh_register();
                self.emit(Instruction::Zext { dest:  dest.clone(),
                                              value: compared, });
                Ok(dest)
            },
        }
    }

    /// Lowers a binary operation: left operand first, then right, then
    /// the opcode pairing the two registers. Comparisons always widen
    /// back to an integer with `zext`.
    fn lower_infix(&mut self,
                   operator: InfixOperator,
                   left: &Expression,
                   right: &Expression)
                   -> LowerResult<String> {
        let left = self.materialize(left)?;
        let right = self.materialize(right)?;

        let opcode = match operator {
            InfixOperator::Add => Ok(BinaryOp::Add),
            InfixOperator::Sub => Ok(BinaryOp::Sub),
            InfixOperator::Mul => Ok(BinaryOp::Mul),
            InfixOperator::Div => Ok(BinaryOp::Sdiv),
            InfixOperator::Eq => Err(Predicate::Eq),
            InfixOperator::NotEq => Err(Predicate::Ne),
            InfixOperator::Gt => Err(Predicate::Sge),
            InfixOperator::Lt => Err(Predicate::Sle),
        };

        match opcode {
            Ok(op) => {
                let dest = self.fresh_register();
                self.emit(Instruction::Binary { dest: dest.clone(),
                                                op,
                                                left: Operand::Register(left),
                                                right: Operand::Register(right) });
                Ok(dest)
            },
            Err(predicate) => {
                let compared = self.fresh_register();
                self.emit(Instruction::Icmp { dest:      compared.clone(),
                                              predicate,
                                              left:      Operand::Register(left),
                                              right:     Operand::Register(right), });
                let dest = self.fresh_register();
                self.emit(Instruction::Zext { dest:  dest.clone(),
                                              value: compared, });
                Ok(dest)
            },
        }
    }

    /// Lowers a call expression.
    ///
    /// Only identifier callees have a function symbol to call. Integer
    /// arguments render in place; local identifier arguments pass their
    /// slot, captured ones materialize through `load-free` first; any
    /// other argument lowers to a register.
    fn lower_call(&mut self,
                  function: &Expression,
                  arguments: &[Expression],
                  line: usize)
                  -> LowerResult<String> {
        let Expression::Identifier(callee) = function else {
            return Err(LowerError::Unsupported { construct: "a computed callee",
                                                 line });
        };

        let mut operands = Vec::new();
        for argument in arguments {
            let operand = match argument {
                Expression::Integer { value, .. } => Operand::Literal(*value),
                Expression::Identifier(identifier) => match self.resolve(identifier)? {
                    Resolution::Local => Operand::Register(identifier.value.clone()),
                    Resolution::Captured => {
                        Operand::Register(self.materialize_identifier(identifier)?)
                    },
                },
                other => Operand::Register(self.materialize(other)?),
            };
            operands.push(operand);
        }

        let dest = self.fresh_register();
        self.emit(Instruction::Call { dest:      dest.clone(),
                                      callee:    callee.value.clone(),
                                      arguments: operands, });
        Ok(dest)
    }
}
