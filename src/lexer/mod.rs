//! Lexer for the Monkey language
//!
//! Wraps the logos-generated scanner in an on-demand token source: every call
//! to [`Lexer::next_token`] consumes one token, and once the input is exhausted
//! it keeps returning EOF.

mod tokens;

pub use tokens::{Token, TokenKind};

use crate::common::Span;
use logos::Logos;

/// On-demand token source over a source string
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, TokenKind>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
        }
    }

    /// Consume and return the next token
    pub fn next_token(&mut self) -> Token {
        let Some(result) = self.inner.next() else {
            return Token::new(TokenKind::Eof, "", Span::point(self.source.len()));
        };

        let span = Span::from(self.inner.span());
        let slice = self.inner.slice();
        match result {
            Ok(TokenKind::String) => Token::new(TokenKind::String, tokens::decode_string(slice), span),
            Ok(kind) => Token::new(kind, slice, span),
            Err(()) => Token::new(TokenKind::Illegal, slice, span),
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to, but not including, EOF
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

/// Lex a whole source string. The returned stream always ends with EOF.
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    tracing::trace!("lexed {} tokens", tokens.len());
    tokens
}
