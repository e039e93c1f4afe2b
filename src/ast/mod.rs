//! Abstract Syntax Tree for the Monkey language
//!
//! This module defines the AST types produced by the parser. Every node can
//! report the literal of the token it starts with and render itself back to
//! source text that parses to the same tree.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::lexer::TokenKind;

/// Capabilities shared by every AST node
pub trait Node: fmt::Display {
    /// Literal text of the token the node was parsed from
    fn token_literal(&self) -> String;

    /// Canonical source rendering
    fn to_source_string(&self) -> String {
        self.to_string()
    }
}

/// Root of a parsed program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

// ==================== STATEMENTS ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
}

/// `let <name> = <value>;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetStatement {
    pub name: Identifier,
    pub value: Expression,
}

/// `return <value>;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

/// Brace-delimited statement sequence (function bodies, `if` branches)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

// ==================== EXPRESSIONS ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Identifier(Identifier),
    Integer(i64),
    String(String),
    Boolean(bool),
    Prefix {
        operator: PrefixOperator,
        right: Box<Expression>,
    },
    Infix {
        operator: InfixOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    /// Shared with every closure created from it
    Function(Rc<FunctionLiteral>),
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// `fn(<parameters>) <body>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionLiteral {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrefixOperator {
    Bang,
    Minus,
}

impl PrefixOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Bang => Some(PrefixOperator::Bang),
            TokenKind::Minus => Some(PrefixOperator::Minus),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixOperator::Bang => "!",
            PrefixOperator::Minus => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfixOperator {
    Plus,
    Minus,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl InfixOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => InfixOperator::Plus,
            TokenKind::Minus => InfixOperator::Minus,
            TokenKind::Asterisk => InfixOperator::Asterisk,
            TokenKind::Slash => InfixOperator::Slash,
            TokenKind::Lt => InfixOperator::Lt,
            TokenKind::Gt => InfixOperator::Gt,
            TokenKind::Eq => InfixOperator::Eq,
            TokenKind::NotEq => InfixOperator::NotEq,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Asterisk => "*",
            InfixOperator::Slash => "/",
            InfixOperator::Lt => "<",
            InfixOperator::Gt => ">",
            InfixOperator::Eq => "==",
            InfixOperator::NotEq => "!=",
        }
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== TOKEN LITERALS ====================

impl Node for Program {
    fn token_literal(&self) -> String {
        self.statements
            .first()
            .map(Node::token_literal)
            .unwrap_or_default()
    }
}

impl Node for Statement {
    fn token_literal(&self) -> String {
        match self {
            Statement::Let(_) => "let".to_string(),
            Statement::Return(_) => "return".to_string(),
            Statement::Expression(stmt) => stmt.expression.token_literal(),
            Statement::Block(block) => block.token_literal(),
        }
    }
}

impl Node for BlockStatement {
    fn token_literal(&self) -> String {
        "{".to_string()
    }
}

impl Node for Identifier {
    fn token_literal(&self) -> String {
        self.name.clone()
    }
}

impl Node for FunctionLiteral {
    fn token_literal(&self) -> String {
        "fn".to_string()
    }
}

impl Node for Expression {
    fn token_literal(&self) -> String {
        match self {
            Expression::Identifier(ident) => ident.token_literal(),
            Expression::Integer(value) => value.to_string(),
            Expression::String(value) => value.clone(),
            Expression::Boolean(value) => value.to_string(),
            Expression::Prefix { operator, .. } => operator.to_string(),
            Expression::Infix { operator, .. } => operator.to_string(),
            Expression::If { .. } => "if".to_string(),
            Expression::Function(func) => func.token_literal(),
            Expression::Call { .. } => "(".to_string(),
        }
    }
}

// ==================== SOURCE RENDERING ====================

/// Statements are separated by a space; an expression statement followed by
/// another statement gets a `;` so the two cannot fuse into a call.
fn write_statements(f: &mut fmt::Formatter<'_>, statements: &[Statement]) -> fmt::Result {
    for (i, stmt) in statements.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", stmt)?;
        if matches!(stmt, Statement::Expression(_)) && i + 1 < statements.len() {
            f.write_str(";")?;
        }
    }
    Ok(())
}

fn write_string_literal(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statements(f, &self.statements)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(stmt) => write!(f, "let {} = {};", stmt.name, stmt.value),
            Statement::Return(stmt) => write!(f, "return {};", stmt.value),
            Statement::Expression(stmt) => write!(f, "{}", stmt.expression),
            Statement::Block(block) => write!(f, "{}", block),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        write_statements(f, &self.statements)?;
        f.write_str(" }")
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ") {}", self.body)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::Integer(value) => write!(f, "{}", value),
            Expression::String(value) => write_string_literal(f, value),
            Expression::Boolean(value) => write!(f, "{}", value),
            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if ({}) {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, " else {}", alt)?;
                }
                Ok(())
            }
            Expression::Function(func) => write!(f, "{}", func),
            Expression::Call { callee, arguments } => {
                write!(f, "{}(", callee)?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}
