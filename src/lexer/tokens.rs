//! Token definitions for the Monkey lexer

use crate::common::Span;
use logos::Logos;
use serde::{Deserialize, Serialize};

/// A token with its kind, literal text, and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Token kinds recognized by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos, Serialize, Deserialize)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    // Keywords
    #[token("fn")]
    Function,
    #[token("let")]
    Let,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("return")]
    Return,

    // Literals. Identifiers never contain digits.
    #[regex(r"[a-zA-Z_]+")]
    Ident,
    #[regex(r"[0-9]+")]
    Int,
    #[token("\"", lex_string)]
    String,

    // Operators
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("!")]
    Bang,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,

    // Delimiters
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // Special
    Illegal,
    Eof,
}

/// Consume a string body up to and including the closing quote.
/// An unterminated string runs to the end of input.
fn lex_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let rest = lex.remainder();
    let mut escaped = false;
    let mut len = rest.len();
    for (i, b) in rest.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'"' => {
                len = i + 1;
                break;
            }
            _ => {}
        }
    }
    lex.bump(len);
    true
}

/// Decode the raw slice of a string token (quotes included) into its contents
pub(crate) fn decode_string(slice: &str) -> String {
    let body = slice.strip_prefix('"').unwrap_or(slice);
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => break,
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => break,
            },
            c => out.push(c),
        }
    }
    out
}

impl TokenKind {
    /// Check if this token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Function
                | TokenKind::Let
                | TokenKind::True
                | TokenKind::False
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Return
        )
    }

    /// Check if this token is a literal
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::String | TokenKind::True | TokenKind::False
        )
    }

    /// Check if this token is an operator
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Bang
                | TokenKind::Asterisk
                | TokenKind::Slash
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::Eq
                | TokenKind::NotEq
        )
    }

    /// Name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::String => "STRING",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_string() {
        assert_eq!(decode_string("\"hello world\""), "hello world");
    }

    #[test]
    fn test_decode_escapes() {
        assert_eq!(decode_string(r#""a\"b\\c\nd""#), "a\"b\\c\nd");
    }

    #[test]
    fn test_decode_unterminated() {
        assert_eq!(decode_string("\"abc"), "abc");
    }
}
