use std::fmt;

use crate::interpreter::lexer::Token;

/// An abstract syntax tree node representing an expression.
///
/// `Expression` covers every value-producing construct of the language, from
/// literals and identifiers to conditionals, function literals and calls.
/// Each variant owns the token it originated from, so diagnostics and
/// external renderings always have a source line to point at.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Reference to a binding by name.
    Identifier(Identifier),
    /// A 64-bit signed integer literal.
    Integer {
        /// The token the literal was parsed from.
        token: Token,
        /// The decoded value.
        value: i64,
    },
    /// A boolean literal: `true` or `false`.
    Boolean {
        /// The token the literal was parsed from.
        token: Token,
        /// The literal value.
        value: bool,
    },
    /// A string literal. The value carries the text between the quotes,
    /// with no escape processing.
    Str {
        /// The token the literal was parsed from.
        token: Token,
        /// The string contents.
        value: String,
    },
    /// A prefix operation such as `!ok` or `-x`.
    Prefix {
        /// The operator token.
        token:    Token,
        /// The prefix operator to apply.
        operator: PrefixOperator,
        /// The operand expression.
        right:    Box<Expression>,
    },
    /// A binary operation such as `a + b` or `a == b`.
    Infix {
        /// The operator token.
        token:    Token,
        /// Left operand.
        left:     Box<Expression>,
        /// The operator.
        operator: InfixOperator,
        /// Right operand.
        right:    Box<Expression>,
    },
    /// A conditional expression with an optional alternative block.
    If {
        /// The `if` token.
        token:       Token,
        /// The condition expression.
        condition:   Box<Expression>,
        /// Block evaluated when the condition is truthy.
        consequence: BlockStatement,
        /// Block evaluated otherwise, if present.
        alternative: Option<BlockStatement>,
    },
    /// A function literal: `fn(a, b) { ... }`.
    Function {
        /// The `fn` token.
        token:      Token,
        /// Parameter names, in declaration order.
        parameters: Vec<Identifier>,
        /// The function body.
        body:       BlockStatement,
    },
    /// A call expression: `callee(arg0, arg1, ...)`.
    Call {
        /// The `(` token that introduced the argument list.
        token:     Token,
        /// The expression being called.
        function:  Box<Expression>,
        /// Argument expressions, left to right.
        arguments: Vec<Expression>,
    },
}

impl Expression {
    /// Gets the source line this expression originated on.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Identifier(identifier) => identifier.token.line,
            Self::Integer { token, .. }
            | Self::Boolean { token, .. }
            | Self::Str { token, .. }
            | Self::Prefix { token, .. }
            | Self::Infix { token, .. }
            | Self::If { token, .. }
            | Self::Function { token, .. }
            | Self::Call { token, .. } => token.line,
        }
    }
}

/// A name occurring in source, either as a reference or as a binding target.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// The identifier token.
    pub token: Token,
    /// The name itself.
    pub value: String,
}

/// A top-level or block-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A `let` binding: `let name = value;`.
    Let {
        /// The `let` token.
        token: Token,
        /// The bound name.
        name:  Identifier,
        /// The bound expression.
        value: Expression,
    },
    /// A `return` statement: `return value;`.
    Return {
        /// The `return` token.
        token: Token,
        /// The returned expression.
        value: Expression,
    },
    /// A bare expression in statement position.
    Expression {
        /// The first token of the expression.
        token:      Token,
        /// The expression itself.
        expression: Expression,
    },
}

impl Statement {
    /// Gets the source line this statement starts on.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Let { token, .. }
            | Self::Return { token, .. }
            | Self::Expression { token, .. } => token.line,
        }
    }
}

/// A `{ ... }` block of statements, used by conditionals and function bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// The `{` token.
    pub token:      Token,
    /// The statements inside the block, in order.
    pub statements: Vec<Statement>,
}

/// The root of a parse: the ordered list of top-level statements.
///
/// The program is immutable once parsing finishes; both back ends read it
/// without modifying it, so one parse can feed the evaluator and the
/// lowerer alike.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}

/// A prefix (unary) operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefixOperator {
    /// Logical negation (`!`).
    Not,
    /// Arithmetic negation (`-`).
    Negate,
}

/// An infix (binary) operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOperator {
    /// Addition (`+`), also string concatenation.
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Division (`/`).
    Div,
    /// Equality (`==`).
    Eq,
    /// Inequality (`!=`).
    NotEq,
    /// Less than (`<`).
    Lt,
    /// Greater than (`>`).
    Gt,
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Not => "!",
            Self::Negate => "-",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(identifier) => write!(f, "{identifier}"),
            Self::Integer { value, .. } => write!(f, "{value}"),
            Self::Boolean { value, .. } => write!(f, "{value}"),
            Self::Str { value, .. } => write!(f, "\"{value}\""),
            Self::Prefix { operator, right, .. } => write!(f, "({operator}{right})"),
            Self::Infix { left, operator, right, .. } => {
                write!(f, "({left} {operator} {right})")
            },
            Self::If { condition,
                       consequence,
                       alternative,
                       .. } => {
                write!(f, "if ({condition}) {{ {consequence} }}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{ {alternative} }}")?;
                }
                Ok(())
            },
            Self::Function { parameters, body, .. } => {
                let parameters = parameters.iter()
                                           .map(ToString::to_string)
                                           .collect::<Vec<_>>()
                                           .join(", ");
                write!(f, "fn({parameters}) {{ {body} }}")
            },
            Self::Call { function, arguments, .. } => {
                let arguments = arguments.iter()
                                         .map(ToString::to_string)
                                         .collect::<Vec<_>>()
                                         .join(", ");
                write!(f, "{function}({arguments})")
            },
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let { name, value, .. } => write!(f, "let {name} = {value};"),
            Self::Return { value, .. } => write!(f, "return {value};"),
            Self::Expression { expression, .. } => write!(f, "{expression};"),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let statements = self.statements
                             .iter()
                             .map(ToString::to_string)
                             .collect::<Vec<_>>()
                             .join(" ");
        write!(f, "{statements}")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let statements = self.statements
                             .iter()
                             .map(ToString::to_string)
                             .collect::<Vec<_>>()
                             .join("\n");
        write!(f, "{statements}")
    }
}
