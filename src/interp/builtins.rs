//! Native functions reachable by name from Monkey code
//!
//! Identifier resolution falls back to this registry when a name is not bound
//! in any enclosing environment, so a `let` of the same name shadows a builtin.

use std::rc::Rc;

use indexmap::IndexMap;

use super::eval::RuntimeError;
use super::value::{Builtin, BuiltinFn, Object, Value};

thread_local! {
    static BUILTINS: IndexMap<&'static str, Value> = registry();
}

fn registry() -> IndexMap<&'static str, Value> {
    let natives: [(&'static str, BuiltinFn); 1] = [("len", len)];
    natives
        .into_iter()
        .map(|(name, func)| (name, Rc::new(Object::Builtin(Builtin { name, func }))))
        .collect()
}

/// Look up a builtin by name
pub fn lookup(name: &str) -> Option<Value> {
    BUILTINS.with(|builtins| builtins.get(name).cloned())
}

/// Names of all builtins, in registration order
pub fn names() -> Vec<&'static str> {
    BUILTINS.with(|builtins| builtins.keys().copied().collect())
}

fn expect_args(args: &[Value], want: usize) -> Result<(), RuntimeError> {
    if args.len() != want {
        return Err(RuntimeError::WrongArgumentCount {
            got: args.len(),
            want,
        });
    }
    Ok(())
}

/// `len(s)`: number of characters in a string
fn len(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_args(args, 1)?;
    match &*args[0] {
        Object::String(s) => Ok(Object::integer(s.chars().count() as i64)),
        other => Err(RuntimeError::UnsupportedArgument {
            builtin: "len",
            got: other.type_tag(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_returns_same_instance() {
        let a = lookup("len").expect("len is registered");
        let b = lookup("len").expect("len is registered");
        assert!(Rc::ptr_eq(&a, &b));
        assert!(lookup("nope").is_none());
        assert_eq!(names(), vec!["len"]);
    }

    #[test]
    fn test_len() {
        let result = len(&[Object::string("héllo")]).unwrap();
        assert_eq!(result.as_int(), Some(5));
    }

    #[test]
    fn test_len_errors() {
        assert_eq!(
            len(&[]).unwrap_err().to_string(),
            "wrong number of arguments. got=0, want=1"
        );
        assert_eq!(
            len(&[Object::integer(1)]).unwrap_err().to_string(),
            "argument to `len` not supported, got INTEGER"
        );
    }
}
