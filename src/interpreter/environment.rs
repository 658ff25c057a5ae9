use std::{
    cell::RefCell,
    collections::HashMap,
    fmt, mem,
    rc::{Rc, Weak},
};

use log::trace;

use crate::interpreter::value::Value;

struct Scope {
    bindings: HashMap<String, Value>,
    parent:   Option<Environment>,
}

/// A lexical scope holding variable bindings.
///
/// Environments form a chain: every scope except the global one links to the
/// scope it was created in. Cloning an `Environment` clones the handle, not
/// the bindings, so a closure that keeps a clone keeps the scope alive and
/// observes later changes to it.
///
/// # Example
/// ```
/// use minilang::interpreter::{environment::Environment, value::Value};
///
/// let global = Environment::new();
/// global.define("x", Value::Integer(1));
///
/// let inner = global.child();
/// inner.define("x", Value::Integer(2));
///
/// assert_eq!(inner.get("x"), Some(Value::Integer(2)));
/// assert_eq!(global.get("x"), Some(Value::Integer(1)));
/// ```
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Scope>>);

/// A handle to an [`Environment`] that does not keep it alive.
#[derive(Debug, Clone)]
pub struct WeakEnvironment(Weak<RefCell<Scope>>);

impl WeakEnvironment {
    /// Returns the scope if something else still holds it.
    #[must_use]
    pub fn upgrade(&self) -> Option<Environment> {
        self.0.upgrade().map(Environment)
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Returns `true` if this handle refers to the scope of `env`.
    #[must_use]
    pub fn points_to(&self, env: &Environment) -> bool {
        self.0.ptr_eq(&Rc::downgrade(&env.0))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an empty root scope.
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Scope { bindings: HashMap::new(),
                                          parent:   None, })))
    }

    /// Creates an empty scope whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        trace!("entering child scope (depth {})", self.depth() + 1);
        Self(Rc::new(RefCell::new(Scope { bindings: HashMap::new(),
                                          parent:   Some(self.clone()), })))
    }

    /// Binds `name` in this scope, replacing any binding of the same name
    /// here and shadowing bindings in enclosing scopes.
    pub fn define(&self, name: &str, value: Value) {
        self.0
            .borrow_mut()
            .bindings
            .insert(name.to_string(), value);
    }

    /// Looks `name` up, walking from this scope outward.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let next = {
                let scope = current.0.borrow();
                if let Some(value) = scope.bindings.get(name) {
                    return Some(value.clone());
                }
                scope.parent.clone()?
            };
            current = next;
        }
    }

    /// Rebinds `name` in the nearest scope that already holds it.
    ///
    /// Returns `false`, without binding anything, when no scope in the chain
    /// holds the name.
    pub fn assign(&self, name: &str, value: Value) -> bool {
        let mut current = self.clone();
        loop {
            let next = {
                let mut scope = current.0.borrow_mut();
                if let Some(slot) = scope.bindings.get_mut(name) {
                    *slot = value;
                    return true;
                }
                match scope.parent.clone() {
                    Some(parent) => parent,
                    None => return false,
                }
            };
            current = next;
        }
    }

    /// Number of enclosing scopes above this one.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut parent = self.0.borrow().parent.clone();
        while let Some(scope) = parent {
            depth += 1;
            parent = scope.0.borrow().parent.clone();
        }
        depth
    }

    /// Names bound directly in this scope, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.borrow().bindings.keys().cloned().collect();
        names.sort();
        names
    }

    /// Removes every binding from this scope. Enclosing scopes are not
    /// touched.
    pub fn clear(&self) {
        let bindings = mem::take(&mut self.0.borrow_mut().bindings);
        drop(bindings);
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakEnvironment {
        WeakEnvironment(Rc::downgrade(&self.0))
    }

    /// Returns `true` if both handles refer to the same scope.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
         .field("names", &self.names())
         .field("depth", &self.depth())
         .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outward() {
        let global = Environment::new();
        global.define("a", Value::Integer(1));
        let inner = global.child().child();

        assert_eq!(inner.get("a"), Some(Value::Integer(1)));
        assert_eq!(inner.get("missing"), None);
        assert_eq!(inner.depth(), 2);
    }

    #[test]
    fn define_shadows_without_touching_parent() {
        let global = Environment::new();
        global.define("a", Value::Integer(1));
        let inner = global.child();
        inner.define("a", Value::from("shadow"));

        assert_eq!(inner.get("a"), Some(Value::from("shadow")));
        assert_eq!(global.get("a"), Some(Value::Integer(1)));
    }

    #[test]
    fn redefinition_in_same_scope_rebinds() {
        let global = Environment::new();
        global.define("a", Value::Integer(1));
        global.define("a", Value::Integer(2));

        assert_eq!(global.get("a"), Some(Value::Integer(2)));
        assert_eq!(global.names(), vec!["a".to_string()]);
    }

    #[test]
    fn assign_updates_nearest_holder() {
        let global = Environment::new();
        global.define("a", Value::Integer(1));
        let middle = global.child();
        middle.define("a", Value::Integer(10));
        let inner = middle.child();

        assert!(inner.assign("a", Value::Integer(11)));
        assert_eq!(middle.get("a"), Some(Value::Integer(11)));
        assert_eq!(global.get("a"), Some(Value::Integer(1)));
    }

    #[test]
    fn assign_never_declares() {
        let global = Environment::new();
        let inner = global.child();

        assert!(!inner.assign("ghost", Value::Null));
        assert_eq!(inner.get("ghost"), None);
        assert_eq!(global.get("ghost"), None);
    }

    #[test]
    fn clear_empties_only_this_scope() {
        let global = Environment::new();
        global.define("a", Value::Integer(1));
        let inner = global.child();
        inner.define("b", Value::Integer(2));

        inner.clear();
        assert_eq!(inner.get("b"), None);
        assert_eq!(inner.get("a"), Some(Value::Integer(1)));
    }

    #[test]
    fn weak_handles_do_not_keep_scopes_alive() {
        let env = Environment::new();
        let weak = env.downgrade();
        assert!(weak.points_to(&env));
        assert!(weak.upgrade().is_some_and(|scope| scope.ptr_eq(&env)));

        drop(env);
        assert!(!weak.is_live());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn clones_share_the_scope() {
        let env = Environment::new();
        let alias = env.clone();
        alias.define("x", Value::Integer(3));

        assert!(env.ptr_eq(&alias));
        assert_eq!(env.get("x"), Some(Value::Integer(3)));
        assert!(!env.ptr_eq(&env.child()));
    }
}
