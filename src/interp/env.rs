//! Lexical environments
//!
//! An environment maps names to values and links to the scope it was created
//! in. Closures hold a shared handle to their defining environment, so later
//! `let`s in that scope are visible to them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::value::Value;

/// Shared, mutable handle to an environment
pub type Env = Rc<RefCell<Environment>>;

#[derive(Default)]
pub struct Environment {
    store: FxHashMap<String, Value>,
    outer: Option<Env>,
}

impl Environment {
    /// Create a root environment
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// Create a child scope of `outer`
    pub fn enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: FxHashMap::default(),
            outer: Some(Rc::clone(outer)),
        }))
    }

    /// Look a name up here, then in enclosing scopes
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(Rc::clone(value)),
            None => self.outer.as_ref()?.borrow().get(name),
        }
    }

    /// Bind a name in this scope, shadowing any outer binding
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Value {
        let name = name.into();
        tracing::trace!(%name, "bind");
        self.store.insert(name, Rc::clone(&value));
        value
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    pub fn outer(&self) -> Option<&Env> {
        self.outer.as_ref()
    }

    /// Bindings of this scope only, sorted by name
    pub fn bindings(&self) -> Vec<(String, Value)> {
        let mut bindings: Vec<_> = self
            .store
            .iter()
            .map(|(name, value)| (name.clone(), Rc::clone(value)))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(&b.0));
        bindings
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.store.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("has_outer", &self.outer.is_some())
            .finish()
    }
}
