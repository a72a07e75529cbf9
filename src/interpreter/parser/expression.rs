use crate::{
    ast::{BlockStatement, Expression, InfixOperator, PrefixOperator},
    error::{LexError, ParseError},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

/// Operator binding strength, lowest to highest.
///
/// The derived ordering is what drives the Pratt loop: an infix operator
/// only takes over the left expression while its precedence exceeds the
/// minimum the caller passed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// The default for anything that is not an infix operator.
    Lowest,
    /// `==`, `!=`
    Equals,
    /// `<`, `>`
    LessGreater,
    /// `+`, binary `-`
    Sum,
    /// `*`, `/`
    Product,
    /// Unary `!`, unary `-`
    Prefix,
    /// Function application via `(`.
    Call,
}

/// Looks up the infix binding strength of a token kind.
///
/// Token kinds with no infix role sit at `Lowest`, which keeps them from
/// ever continuing an expression.
#[must_use]
pub const fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// Maps a token kind to its corresponding infix operator.
///
/// Returns `None` for token kinds with no infix rule; the expression loop
/// then hands the left expression back unchanged.
#[must_use]
pub const fn infix_operator_of(kind: TokenKind) -> Option<InfixOperator> {
    match kind {
        TokenKind::Plus => Some(InfixOperator::Add),
        TokenKind::Minus => Some(InfixOperator::Sub),
        TokenKind::Asterisk => Some(InfixOperator::Mul),
        TokenKind::Slash => Some(InfixOperator::Div),
        TokenKind::Eq => Some(InfixOperator::Eq),
        TokenKind::NotEq => Some(InfixOperator::NotEq),
        TokenKind::Lt => Some(InfixOperator::Lt),
        TokenKind::Gt => Some(InfixOperator::Gt),
        _ => None,
    }
}

impl Parser {
    /// Parses an expression with the Pratt loop.
    ///
    /// A prefix rule for the current token produces the left expression
    /// (its absence is fatal); then, while the peeked token is neither `;`
    /// nor end of file and binds tighter than `precedence`, the matching
    /// infix rule is applied and the result re-bound as the left
    /// expression.
    ///
    /// # Parameters
    /// - `precedence`: The minimum binding strength of the surrounding
    ///   context.
    ///
    /// # Returns
    /// The parsed expression node.
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon)
              && !self.peek_is(TokenKind::Eof)
              && precedence < precedence_of(self.peek().kind)
        {
            if self.peek_is(TokenKind::LParen) {
                self.next_token();
                left = self.parse_call_expression(left)?;
            } else if let Some(operator) = infix_operator_of(self.peek().kind) {
                self.next_token();
                left = self.parse_infix_expression(left, operator)?;
            } else {
                return Ok(left);
            }
        }

        Ok(left)
    }

    /// Dispatches the prefix rule for the current token.
    ///
    /// An `Illegal` token surfaces the lexical failure it encodes; a token
    /// with no prefix rule is a fatal parse error.
    fn parse_prefix(&mut self) -> ParseResult<Expression> {
        match self.current().kind {
            TokenKind::Ident => Ok(Expression::Identifier(self.make_identifier())),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::Str => {
                let token = self.current().clone();
                let value = token.literal.clone();
                Ok(Expression::Str { token, value })
            },
            TokenKind::True | TokenKind::False => {
                let token = self.current().clone();
                let value = token.kind == TokenKind::True;
                Ok(Expression::Boolean { token, value })
            },
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::Illegal => Err(LexError::of_token(self.current()).into()),
            kind => {
                let token = if self.current().literal.is_empty() {
                    kind.to_string()
                } else {
                    self.current().literal.clone()
                };
                Err(ParseError::NoPrefixRule { token,
                                               line: self.current().line, }.into())
            },
        }
    }

    /// Parses an integer literal with decimal conversion.
    ///
    /// The token text is all digits by construction, so the only failure
    /// mode is overflow, which is fatal.
    fn parse_integer_literal(&mut self) -> ParseResult<Expression> {
        let token = self.current().clone();
        let value = token.literal
                         .parse::<i64>()
                         .map_err(|_| ParseError::InvalidIntegerLiteral { literal: token.literal
                                                                                        .clone(),
                                                                          line:    token.line, })?;
        Ok(Expression::Integer { token, value })
    }

    /// Parses `!` or `-` applied to the expression that follows.
    fn parse_prefix_expression(&mut self) -> ParseResult<Expression> {
        let token = self.current().clone();
        let operator = if token.kind == TokenKind::Bang {
            PrefixOperator::Not
        } else {
            PrefixOperator::Negate
        };

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix { token,
                                operator,
                                right: Box::new(right) })
    }

    /// Parses the right side of a binary operator.
    ///
    /// The current token is the operator; its own precedence becomes the
    /// minimum for the right operand, which yields left associativity.
    fn parse_infix_expression(&mut self,
                              left: Expression,
                              operator: InfixOperator)
                              -> ParseResult<Expression> {
        let token = self.current().clone();
        let precedence = precedence_of(token.kind);

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix { token,
                               left: Box::new(left),
                               operator,
                               right: Box::new(right) })
    }

    /// Parses `( <expression> )`.
    fn parse_grouped_expression(&mut self) -> ParseResult<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expression)
    }

    /// Parses `if (<condition>) { <consequence> }` with an optional
    /// `else { <alternative> }`.
    fn parse_if_expression(&mut self) -> ParseResult<Expression> {
        let token = self.current().clone();

        self.expect_peek(TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Ok(Expression::If { token,
                            condition: Box::new(condition),
                            consequence,
                            alternative })
    }

    /// Parses the statements between `{` and `}`.
    fn parse_block_statement(&mut self) -> ParseResult<BlockStatement> {
        let token = self.current().clone();
        let mut statements = Vec::new();

        self.next_token();
        while !self.current_is(TokenKind::RBrace) {
            if self.current_is(TokenKind::Eof) {
                return Err(ParseError::UnexpectedToken { expected: TokenKind::RBrace,
                                                         found:    self.current()
                                                                       .literal
                                                                       .clone(),
                                                         line:     self.current().line, }.into());
            }
            statements.push(self.parse_statement()?);
            self.next_token();
        }

        Ok(BlockStatement { token, statements })
    }

    /// Parses `fn (<parameters>) { <body> }`.
    fn parse_function_literal(&mut self) -> ParseResult<Expression> {
        let token = self.current().clone();

        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement()?;

        Ok(Expression::Function { token,
                                  parameters,
                                  body })
    }

    /// Parses the comma-separated parameter names of a function literal.
    fn parse_function_parameters(&mut self) -> ParseResult<Vec<crate::ast::Identifier>> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Ok(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(self.make_identifier());

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(self.make_identifier());
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(parameters)
    }

    /// Parses the argument list of a call expression.
    ///
    /// The current token is the `(` that triggered the call rule; the
    /// callee expression was already parsed as the left side.
    fn parse_call_expression(&mut self, function: Expression) -> ParseResult<Expression> {
        let token = self.current().clone();
        let arguments = self.parse_call_arguments()?;

        Ok(Expression::Call { token,
                              function: Box::new(function),
                              arguments })
    }

    /// Parses the comma-separated argument expressions of a call.
    fn parse_call_arguments(&mut self) -> ParseResult<Vec<Expression>> {
        let mut arguments = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Ok(arguments);
        }

        self.next_token();
        arguments.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(TokenKind::RParen)?;
        Ok(arguments)
    }
}
