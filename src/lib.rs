//! Monkey Programming Language Interpreter
//!
//! A small dynamically-typed language with integers, booleans, strings,
//! `let`/`return`, `if`/`else`, first-class functions with closures, and a
//! native `len` builtin.
//!
//! # Architecture
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST (+ errors) → Evaluator (AST, Env) → Value
//! ```
//!
//! # Example
//!
//! ```monkey
//! let newAdder = fn(x) { fn(y) { x + y }; };
//! let addTwo = newAdder(2);
//! addTwo(3); // 5
//! ```

pub mod ast;
pub mod common;
pub mod diagnostics;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod repl;

// Re-export diagnostics for convenience
pub use diagnostics::{Reporter, SourceFile};

// Re-exports for convenience
pub use ast::Program;
pub use interp::{evaluate, Env, Environment, Interpreter, Object, Value};
pub use parser::{parse, ParseError, ParseErrors};

/// Interpreter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse and evaluate source code in a fresh environment.
///
/// Syntax errors abort before evaluation. A runtime error is not a Rust error:
/// it comes back as an `Object::Error` value.
pub fn interpret(source: &str) -> miette::Result<Value> {
    interpret_in(source, &Environment::new())
}

/// Parse and evaluate source code in an existing environment
pub fn interpret_in(source: &str, env: &Env) -> miette::Result<Value> {
    let (program, errors) = parse(source);
    if !errors.is_empty() {
        return Err(ParseErrors { errors }.into());
    }
    Ok(evaluate(&program, env))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_interpret() {
        let value = interpret("let a = 2; a * 21").unwrap();
        assert_eq!(value.as_int(), Some(42));
    }

    #[test]
    fn test_interpret_rejects_syntax_errors() {
        let err = interpret("let x 5;").unwrap_err();
        assert_eq!(err.to_string(), "found 1 parse error(s)");
    }
}
