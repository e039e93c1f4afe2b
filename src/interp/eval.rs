//! Tree-walking evaluator for the AST
//!
//! Every step returns `Result<Value, ControlFlow>`. A `return` travels up as
//! `ControlFlow::Return` until a function call (or the program) unwraps it;
//! an error travels up as `ControlFlow::Error` and stops everything it passes
//! through. Only [`evaluate`] turns an error into an [`Object::Error`].

use miette::Diagnostic;
use thiserror::Error;

use crate::ast::*;

use super::builtins;
use super::env::{Env, Environment};
use super::value::{same_object, ControlFlow, Object, Value};

type EvalResult = Result<Value, ControlFlow>;

/// Language-level runtime error
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("identifier not found: {0}")]
    #[diagnostic(
        code(eval::identifier_not_found),
        help("bind the name with `let` before using it")
    )]
    IdentifierNotFound(String),

    #[error("type mismatch: {left} {operator} {right}")]
    #[diagnostic(code(eval::type_mismatch))]
    TypeMismatch {
        left: &'static str,
        operator: InfixOperator,
        right: &'static str,
    },

    #[error("unknown operator: {left} {operator} {right}")]
    #[diagnostic(code(eval::unknown_operator))]
    UnknownInfixOperator {
        left: &'static str,
        operator: InfixOperator,
        right: &'static str,
    },

    #[error("unknown operator: {operator}{operand}")]
    #[diagnostic(code(eval::unknown_operator))]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        operand: &'static str,
    },

    #[error("not a function: {0}")]
    #[diagnostic(code(eval::not_a_function))]
    NotAFunction(&'static str),

    #[error("division by zero")]
    #[diagnostic(code(eval::division_by_zero))]
    DivisionByZero,

    #[error("wrong number of arguments. got={got}, want={want}")]
    #[diagnostic(code(eval::arity))]
    WrongArgumentCount { got: usize, want: usize },

    #[error("argument to `{builtin}` not supported, got {got}")]
    #[diagnostic(code(eval::unsupported_argument))]
    UnsupportedArgument {
        builtin: &'static str,
        got: &'static str,
    },
}

/// Evaluate a program in `env`.
///
/// A top-level `return` ends the program with its value. A runtime error ends
/// it with an `Object::Error`.
pub fn evaluate(program: &Program, env: &Env) -> Value {
    tracing::debug!(statements = program.statements.len(), "evaluating program");
    match eval_program(program, env) {
        Ok(value) | Err(ControlFlow::Return(value)) => value,
        Err(ControlFlow::Error(error)) => {
            tracing::debug!(%error, "evaluation failed");
            Object::error(error.to_string())
        }
    }
}

/// Evaluate a single expression in `env`
pub fn evaluate_expression(expr: &Expression, env: &Env) -> Value {
    match eval_expression(expr, env) {
        Ok(value) | Err(ControlFlow::Return(value)) => value,
        Err(ControlFlow::Error(error)) => Object::error(error.to_string()),
    }
}

/// Interpreter session: a root environment that persists across evaluations
pub struct Interpreter {
    env: Env,
}

impl Interpreter {
    /// Create an interpreter with a fresh root environment
    pub fn new() -> Self {
        Self::with_env(Environment::new())
    }

    pub fn with_env(env: Env) -> Self {
        Interpreter { env }
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Evaluate a program against the session environment
    pub fn eval(&mut self, program: &Program) -> Value {
        evaluate(program, &self.env)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn eval_program(program: &Program, env: &Env) -> EvalResult {
    let mut result = Object::null();
    for stmt in &program.statements {
        match eval_statement(stmt, env) {
            Ok(value) => result = value,
            Err(ControlFlow::Return(value)) => return Ok(value),
            Err(error) => return Err(error),
        }
    }
    Ok(result)
}

/// Evaluate a block. `return` is left wrapped so it escapes enclosing blocks.
fn eval_block(block: &BlockStatement, env: &Env) -> EvalResult {
    let mut result = Object::null();
    for stmt in &block.statements {
        result = eval_statement(stmt, env)?;
    }
    Ok(result)
}

fn eval_statement(stmt: &Statement, env: &Env) -> EvalResult {
    match stmt {
        Statement::Expression(stmt) => eval_expression(&stmt.expression, env),
        Statement::Let(stmt) => {
            let value = eval_expression(&stmt.value, env)?;
            env.borrow_mut().set(stmt.name.name.clone(), value);
            Ok(Object::null())
        }
        Statement::Return(stmt) => {
            let value = eval_expression(&stmt.value, env)?;
            Err(ControlFlow::Return(value))
        }
        Statement::Block(block) => eval_block(block, env),
    }
}

fn eval_expression(expr: &Expression, env: &Env) -> EvalResult {
    match expr {
        Expression::Integer(n) => Ok(Object::integer(*n)),
        Expression::String(s) => Ok(Object::string(s.as_str())),
        Expression::Boolean(b) => Ok(Object::boolean(*b)),

        Expression::Identifier(ident) => eval_identifier(ident, env),

        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env)?;
            Ok(eval_prefix(*operator, &right)?)
        }

        Expression::Infix {
            operator,
            left,
            right,
        } => {
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;
            Ok(eval_infix(*operator, &left, &right)?)
        }

        Expression::If {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, env)?;
            if condition.is_truthy() {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                Ok(Object::null())
            }
        }

        Expression::Function(literal) => Ok(Object::function(literal.clone(), env.clone())),

        Expression::Call { callee, arguments } => {
            let callee = eval_expression(callee, env)?;
            let args = arguments
                .iter()
                .map(|arg| eval_expression(arg, env))
                .collect::<Result<Vec<_>, _>>()?;
            apply_function(&callee, args)
        }
    }
}

fn eval_identifier(ident: &Identifier, env: &Env) -> EvalResult {
    if let Some(value) = env.borrow().get(&ident.name) {
        return Ok(value);
    }
    builtins::lookup(&ident.name)
        .ok_or_else(|| RuntimeError::IdentifierNotFound(ident.name.clone()).into())
}

fn eval_prefix(operator: PrefixOperator, right: &Value) -> Result<Value, RuntimeError> {
    match operator {
        // Not a truthiness inversion: only `false` and `null` negate to `true`.
        PrefixOperator::Bang => Ok(Object::boolean(matches!(
            **right,
            Object::Boolean(false) | Object::Null
        ))),
        PrefixOperator::Minus => match **right {
            Object::Integer(n) => Ok(Object::integer(n.wrapping_neg())),
            _ => Err(RuntimeError::UnknownPrefixOperator {
                operator,
                operand: right.type_tag(),
            }),
        },
    }
}

fn eval_infix(operator: InfixOperator, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (&**left, &**right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r),
        _ if operator == InfixOperator::Eq => Ok(Object::boolean(same_object(left, right))),
        _ if operator == InfixOperator::NotEq => Ok(Object::boolean(!same_object(left, right))),
        (Object::String(l), Object::String(r)) => eval_string_infix(operator, l, r),
        (l, r) if l.type_tag() != r.type_tag() => Err(RuntimeError::TypeMismatch {
            left: l.type_tag(),
            operator,
            right: r.type_tag(),
        }),
        (l, r) => Err(RuntimeError::UnknownInfixOperator {
            left: l.type_tag(),
            operator,
            right: r.type_tag(),
        }),
    }
}

fn eval_integer_infix(operator: InfixOperator, l: i64, r: i64) -> Result<Value, RuntimeError> {
    let value = match operator {
        InfixOperator::Plus => Object::integer(l.wrapping_add(r)),
        InfixOperator::Minus => Object::integer(l.wrapping_sub(r)),
        InfixOperator::Asterisk => Object::integer(l.wrapping_mul(r)),
        InfixOperator::Slash => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Object::integer(l.wrapping_div(r))
        }
        InfixOperator::Lt => Object::boolean(l < r),
        InfixOperator::Gt => Object::boolean(l > r),
        InfixOperator::Eq => Object::boolean(l == r),
        InfixOperator::NotEq => Object::boolean(l != r),
    };
    Ok(value)
}

fn eval_string_infix(operator: InfixOperator, l: &str, r: &str) -> Result<Value, RuntimeError> {
    match operator {
        InfixOperator::Plus => Ok(Object::string(format!("{}{}", l, r))),
        _ => Err(RuntimeError::UnknownInfixOperator {
            left: "STRING",
            operator,
            right: "STRING",
        }),
    }
}

/// Call a function value. Parameters bind positionally; surplus arguments are
/// ignored and missing ones stay unbound.
fn apply_function(callee: &Value, args: Vec<Value>) -> EvalResult {
    match &**callee {
        Object::Function(func) => {
            tracing::trace!(
                params = func.literal.parameters.len(),
                args = args.len(),
                "call"
            );
            let scope = Environment::enclosed(&func.env);
            {
                let mut scope = scope.borrow_mut();
                for (param, arg) in func.literal.parameters.iter().zip(args) {
                    scope.set(param.name.clone(), arg);
                }
            }
            match eval_block(&func.literal.body, &scope) {
                Err(ControlFlow::Return(value)) => Ok(value),
                other => other,
            }
        }
        Object::Builtin(builtin) => Ok((builtin.func)(&args)?),
        other => Err(RuntimeError::NotAFunction(other.type_tag()).into()),
    }
}
