//! Parser for the Monkey language
//!
//! Recursive descent for statements, Pratt (precedence climbing) for
//! expressions. Syntax errors never abort the parse: they are collected and
//! the parser resynchronizes and carries on, so one pass reports every problem
//! it can find.

use std::rc::Rc;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::*;
use crate::lexer::{Lexer, Token, TokenKind};

/// Parse a source string into a program and the syntax errors found along the way
pub fn parse(source: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.into_errors())
}

/// Syntax error
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {found} instead")]
    #[diagnostic(code(parse::unexpected_token))]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        #[label("expected {expected} here")]
        span: SourceSpan,
    },

    #[error("no prefix parse function for {kind} found")]
    #[diagnostic(
        code(parse::no_prefix_parse_fn),
        help("an expression cannot start with this token")
    )]
    NoPrefixParseFn {
        kind: TokenKind,
        #[label("unexpected {kind}")]
        span: SourceSpan,
    },

    #[error("could not parse {literal} as integer")]
    #[diagnostic(
        code(parse::invalid_integer),
        help("integer literals must fit in a signed 64-bit integer")
    )]
    InvalidInteger {
        literal: String,
        #[label("out of range")]
        span: SourceSpan,
    },
}

/// Every syntax error of one parse, reported together
#[derive(Error, Debug, Diagnostic)]
#[error("found {} parse error(s)", .errors.len())]
#[diagnostic(code(parse::failed))]
pub struct ParseErrors {
    #[related]
    pub errors: Vec<ParseError>,
}

/// Operator binding strength, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `!x` `-x`
    Prefix,
    /// `f(x)`
    Call,
}

impl Precedence {
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }
}

type PrefixParseFn<'src> = fn(&mut Parser<'src>) -> Option<Expression>;
type InfixParseFn<'src> = fn(&mut Parser<'src>, Expression) -> Option<Expression>;

/// Parser state: two tokens of lookahead over an on-demand lexer
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    peek: Token,
    errors: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    pub fn new(mut lexer: Lexer<'src>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Advance if the next token is `kind`, otherwise record an error
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenKind) {
        self.errors.push(ParseError::UnexpectedToken {
            expected,
            found: self.peek.kind,
            span: self.peek.span.into(),
        });
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    fn current_precedence(&self) -> Precedence {
        Precedence::of(self.current.kind)
    }

    /// Skip to the end of the current statement
    fn synchronize(&mut self) {
        while !self.current_is(TokenKind::Semicolon) && !self.current_is(TokenKind::Eof) {
            self.next_token();
        }
    }

    // ==================== PROGRAM ====================

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.current_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        tracing::debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        Program { statements }
    }

    // ==================== STATEMENTS ====================

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenKind::Ident) {
            self.synchronize();
            return None;
        }
        let name = Identifier::new(self.current.literal.clone());

        if !self.expect_peek(TokenKind::Assign) {
            self.synchronize();
            return None;
        }
        self.next_token();

        let Some(value) = self.parse_expression(Precedence::Lowest) else {
            self.synchronize();
            return None;
        };

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Statement::Let(LetStatement { name, value }))
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Statement::Return(ReturnStatement { value }))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expression = self.parse_expression(Precedence::Lowest);

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        expression.map(|expression| Statement::Expression(ExpressionStatement { expression }))
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let mut statements = Vec::new();
        self.next_token();

        while !self.current_is(TokenKind::RBrace) && !self.current_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        if self.current_is(TokenKind::Eof) {
            self.errors.push(ParseError::UnexpectedToken {
                expected: TokenKind::RBrace,
                found: TokenKind::Eof,
                span: self.current.span.into(),
            });
        }

        BlockStatement { statements }
    }

    // ==================== EXPRESSIONS ====================

    fn prefix_rule(kind: TokenKind) -> Option<PrefixParseFn<'src>> {
        let rule: PrefixParseFn<'src> = match kind {
            TokenKind::Ident => Self::parse_identifier,
            TokenKind::Int => Self::parse_integer_literal,
            TokenKind::String => Self::parse_string_literal,
            TokenKind::True | TokenKind::False => Self::parse_boolean,
            TokenKind::Bang | TokenKind::Minus => Self::parse_prefix_expression,
            TokenKind::LParen => Self::parse_grouped_expression,
            TokenKind::If => Self::parse_if_expression,
            TokenKind::Function => Self::parse_function_literal,
            _ => return None,
        };
        Some(rule)
    }

    fn infix_rule(kind: TokenKind) -> Option<InfixParseFn<'src>> {
        let rule: InfixParseFn<'src> = match kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::Eq
            | TokenKind::NotEq => Self::parse_infix_expression,
            TokenKind::LParen => Self::parse_call_expression,
            _ => return None,
        };
        Some(rule)
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let Some(prefix) = Self::prefix_rule(self.current.kind) else {
            self.errors.push(ParseError::NoPrefixParseFn {
                kind: self.current.kind,
                span: self.current.span.into(),
            });
            return None;
        };

        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix) = Self::infix_rule(self.peek.kind) else {
                return Some(left);
            };
            self.next_token();
            left = infix(self, left)?;
        }

        Some(left)
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(Identifier::new(
            self.current.literal.clone(),
        )))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.current.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer(value)),
            Err(_) => {
                self.errors.push(ParseError::InvalidInteger {
                    literal: self.current.literal.clone(),
                    span: self.current.span.into(),
                });
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        Some(Expression::String(self.current.literal.clone()))
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(self.current_is(TokenKind::True)))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator = PrefixOperator::from_token(self.current.kind)?;
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix {
            operator,
            right: Box::new(right),
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let operator = InfixOperator::from_token(self.current.kind)?;
        let precedence = self.current_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) || !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expression::Function(Rc::new(FunctionLiteral {
            parameters,
            body,
        })))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(parameters);
        }

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        parameters.push(Identifier::new(self.current.literal.clone()));

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            parameters.push(Identifier::new(self.current.literal.clone()));
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(parameters)
    }

    fn parse_call_expression(&mut self, callee: Expression) -> Option<Expression> {
        let arguments = self.parse_call_arguments()?;
        Some(Expression::Call {
            callee: Box::new(callee),
            arguments,
        })
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut arguments = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(arguments);
        }

        self.next_token();
        arguments.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(Precedence::Lowest < Precedence::Equals);
        assert!(Precedence::Equals < Precedence::LessGreater);
        assert!(Precedence::LessGreater < Precedence::Sum);
        assert!(Precedence::Sum < Precedence::Product);
        assert!(Precedence::Product < Precedence::Prefix);
        assert!(Precedence::Prefix < Precedence::Call);
    }

    #[test]
    fn test_parser_primes_two_tokens() {
        let parser = Parser::new(Lexer::new("let x"));
        assert_eq!(parser.current.kind, TokenKind::Let);
        assert_eq!(parser.peek.kind, TokenKind::Ident);
    }

    #[test]
    fn test_missing_assign_synchronizes() {
        let (program, errors) = parse("let x 5; 10;");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "expected next token to be =, got INT instead"
        );
        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.to_string(), "10");
    }

    #[test]
    fn test_unclosed_block_is_reported() {
        let (_, errors) = parse("fn(x) { x");
        assert!(
            errors
                .iter()
                .any(|e| e.to_string() == "expected next token to be }, got EOF instead")
        );
    }
}
