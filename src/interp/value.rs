//! Runtime values for the interpreter

use std::fmt;
use std::rc::Rc;

use crate::ast::FunctionLiteral;

use super::env::Env;
use super::eval::RuntimeError;

/// Shared handle to a runtime value
pub type Value = Rc<Object>;

/// Signature of a native function
pub type BuiltinFn = fn(&[Value]) -> Result<Value, RuntimeError>;

/// Runtime value
///
/// `Null`, `Boolean(true)` and `Boolean(false)` exist once per thread; build
/// them through [`Object::null`] and [`Object::boolean`] so that identity
/// comparison stays meaningful.
pub enum Object {
    /// 64-bit signed integer
    Integer(i64),
    /// Boolean (singleton)
    Boolean(bool),
    /// String
    String(String),
    /// Absence of a value (singleton)
    Null,
    /// Function closure
    Function(Function),
    /// Native function
    Builtin(Builtin),
    /// Evaluation error surfaced to the caller
    Error(String),
}

/// A function literal paired with the environment it was defined in
pub struct Function {
    pub literal: Rc<FunctionLiteral>,
    pub env: Env,
}

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

thread_local! {
    static NULL: Value = Rc::new(Object::Null);
    static TRUE: Value = Rc::new(Object::Boolean(true));
    static FALSE: Value = Rc::new(Object::Boolean(false));
}

impl Object {
    pub fn null() -> Value {
        NULL.with(Rc::clone)
    }

    pub fn boolean(value: bool) -> Value {
        if value {
            TRUE.with(Rc::clone)
        } else {
            FALSE.with(Rc::clone)
        }
    }

    pub fn integer(value: i64) -> Value {
        Rc::new(Object::Integer(value))
    }

    pub fn string(value: impl Into<String>) -> Value {
        Rc::new(Object::String(value.into()))
    }

    pub fn error(message: impl Into<String>) -> Value {
        Rc::new(Object::Error(message.into()))
    }

    pub fn function(literal: Rc<FunctionLiteral>, env: Env) -> Value {
        Rc::new(Object::Function(Function { literal, env }))
    }

    /// Type name used in error messages
    pub fn type_tag(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::String(_) => "STRING",
            Object::Null => "NULL",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Error(_) => "ERROR",
        }
    }

    /// Human-readable rendering, as printed by the REPL
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    /// Only `null` and `false` are falsy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Object::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Language-level `==`: strings by value, everything else by identity.
/// Integers never reach here; they are compared by the integer operator table.
pub fn same_object(left: &Value, right: &Value) -> bool {
    match (&**left, &**right) {
        (Object::String(a), Object::String(b)) => a == b,
        _ => Rc::ptr_eq(left, right),
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "{}", n),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::String(s) => write!(f, "{}", s),
            Object::Null => write!(f, "null"),
            Object::Function(func) => write!(f, "{}", func.literal),
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

// The captured environment can point back at the function itself, so Debug
// never descends into it.
impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "Integer({})", n),
            Object::Boolean(b) => write!(f, "Boolean({})", b),
            Object::String(s) => write!(f, "String({:?})", s),
            Object::Null => write!(f, "Null"),
            Object::Function(func) => write!(f, "Function({})", func.literal),
            Object::Builtin(builtin) => write!(f, "Builtin({})", builtin.name),
            Object::Error(message) => write!(f, "Error({:?})", message),
        }
    }
}

/// Non-local exit from evaluation
#[derive(Debug)]
pub enum ControlFlow {
    /// `return` unwinding to the nearest function call or the program
    Return(Value),
    /// Error unwinding to the top
    Error(RuntimeError),
}

impl From<RuntimeError> for ControlFlow {
    fn from(error: RuntimeError) -> Self {
        ControlFlow::Error(error)
    }
}
