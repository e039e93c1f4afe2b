//! Tree-walking interpreter for the AST
//!
//! Evaluates parsed programs directly against chained lexical environments.

pub mod builtins;
pub mod env;
pub mod eval;
pub mod value;

pub use env::{Env, Environment};
pub use eval::{evaluate, evaluate_expression, Interpreter, RuntimeError};
pub use value::{Builtin, BuiltinFn, ControlFlow, Function, Object, Value};
