//! Lexically scoped variable storage.
//!
//! Every nested scope gets its own [Environment], borrowing the environment
//! of the enclosing scope as its parent. Names resolve innermost first, so a
//! definition in an inner scope shadows an outer one until the inner
//! environment is dropped.
//!
//! ```rust
//! use mini_lang::minilang::environment::Environment;
//! use mini_lang::minilang::value::Value;
//!
//! let mut root = Environment::new();
//! root.define("x", Value::Integer(1)).unwrap();
//! {
//!     let mut block = Environment::with_parent(&root);
//!     block.define("x", Value::Integer(2)).unwrap();
//!     assert_eq!(block.get("x"), Ok(Value::Integer(2)));
//! }
//! assert_eq!(root.get("x"), Ok(Value::Integer(1)));
//! ```

use core::cell::RefCell;
use core::iter;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, trace};

use crate::minilang::types::{Located, Location};
use crate::minilang::value::Value;

/// Errors raised when a name cannot be resolved or bound.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SemanticError {
    /// No environment in the chain binds the name.
    #[error("Semantic error: Variable '{0}' is not defined.")]
    UndefinedVariable(String),
    /// The name is already bound in the very same scope.
    #[error("Semantic error: Variable '{0}' is already defined in this scope.")]
    AlreadyDefined(String),
}

impl SemanticError {
    /// Attributes the error to a source location, such as the variable reference.
    #[must_use]
    pub fn at(self, location: &Location) -> Located<SemanticError> {
        Located(self, location.clone())
    }
}

/// A single scope: its own bindings plus a borrowed parent scope.
///
/// The parent is never owned; it must outlive every child, which the
/// `'parent` lifetime enforces.
#[derive(Debug, Default)]
pub struct Environment<'parent> {
    /// Bindings of this scope. Kept in a cell so that [`Environment::set`]
    /// can reach an ancestor through a shared borrow.
    variables: RefCell<HashMap<String, Value>>,
    /// The enclosing scope, absent for the root.
    parent: Option<&'parent Environment<'parent>>,
}

impl<'parent> Environment<'parent> {
    /// Creates a root environment.
    #[must_use]
    pub fn new() -> Self {
        Environment::default()
    }

    /// Creates an environment for a scope nested inside `parent`.
    #[must_use]
    pub fn with_parent(parent: &'parent Environment<'parent>) -> Self {
        debug!(depth = parent.scopes().count(), "entering nested scope");
        Environment {
            variables: RefCell::default(),
            parent: Some(parent),
        }
    }

    /// The enclosing environment, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<&'parent Environment<'parent>> {
        self.parent
    }

    /// Binds `name` to `value` in this environment only.
    ///
    /// Requires exclusive access to this scope, so a child, which only
    /// holds a shared borrow of its parent, can never define into it.
    ///
    /// # Errors
    ///
    /// [`SemanticError::AlreadyDefined`] if this environment already binds
    /// `name`; the existing binding is kept. A binding of the same name in an
    /// ancestor is not a conflict, it is shadowed.
    pub fn define(&mut self, name: &str, value: Value) -> Result<(), SemanticError> {
        match self.variables.get_mut().entry(name.to_owned()) {
            Entry::Occupied(_) => Err(SemanticError::AlreadyDefined(name.to_owned())),
            Entry::Vacant(slot) => {
                trace!(variable = name, %value, "defining variable");
                let _: &mut Value = slot.insert(value);
                Ok(())
            }
        }
    }

    /// Whether `name` resolves in this environment or any ancestor.
    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.scopes()
            .any(|env| env.variables.borrow().contains_key(name))
    }

    /// Looks `name` up, innermost scope first.
    ///
    /// # Errors
    ///
    /// [`SemanticError::UndefinedVariable`] if no environment in the chain binds `name`.
    pub fn get(&self, name: &str) -> Result<Value, SemanticError> {
        self.scopes()
            .find_map(|env| env.variables.borrow().get(name).copied())
            .ok_or_else(|| SemanticError::UndefinedVariable(name.to_owned()))
    }

    /// Overwrites the binding of `name` in the nearest environment that has one.
    /// Never creates a binding.
    ///
    /// # Errors
    ///
    /// [`SemanticError::UndefinedVariable`] if no environment in the chain binds
    /// `name`; nothing is modified in that case.
    pub fn set(&self, name: &str, value: Value) -> Result<(), SemanticError> {
        for env in self.scopes() {
            if let Some(slot) = env.variables.borrow_mut().get_mut(name) {
                trace!(variable = name, %value, "assigning variable");
                *slot = value;
                return Ok(());
            }
        }
        Err(SemanticError::UndefinedVariable(name.to_owned()))
    }

    /// This environment followed by its ancestors, innermost first.
    fn scopes(&self) -> impl Iterator<Item = &Self> {
        iter::successors(Some(self), |env| env.parent)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{Environment, SemanticError};
    use crate::minilang::types::Location;
    use crate::minilang::value::Value;

    fn int(n: i64) -> Value {
        Value::Integer(n)
    }

    #[test]
    fn child_shadows_parent_without_touching_it() {
        let mut root = Environment::new();
        root.define("x", int(1)).expect("fresh name");
        root.define("z", int(3)).expect("fresh name");
        {
            let mut child = Environment::with_parent(&root);
            child.define("x", int(2)).expect("shadowing is allowed");
            child.define("z", int(9)).expect("shadowing is allowed");

            assert_eq!(child.get("x"), Ok(int(2)));
            assert_eq!(child.get("z"), Ok(int(9)));
            assert_eq!(root.get("z"), Ok(int(3)));
        }
        assert_eq!(root.get("x"), Ok(int(1)));
        assert_eq!(root.get("z"), Ok(int(3)));
    }

    #[test]
    fn lookups_reach_every_ancestor() {
        let mut root = Environment::new();
        root.define("outer", int(10)).expect("fresh name");
        let middle = Environment::with_parent(&root);
        let mut inner = Environment::with_parent(&middle);
        inner.define("inner", int(20)).expect("fresh name");

        assert!(inner.is_defined("outer"));
        assert!(inner.is_defined("inner"));
        assert!(!middle.is_defined("inner"));
        assert!(!inner.is_defined("nowhere"));
        assert_eq!(inner.get("outer"), Ok(int(10)));
        assert!(inner.parent().is_some());
        assert!(root.parent().is_none());
    }

    #[test]
    fn set_updates_nearest_binding() {
        let mut root = Environment::new();
        root.define("a", int(1)).expect("fresh name");
        root.define("b", int(1)).expect("fresh name");
        let mut child = Environment::with_parent(&root);
        child.define("b", int(2)).expect("shadowing is allowed");

        child.set("a", int(5)).expect("a is bound in root");
        child.set("b", int(6)).expect("b is bound in child");

        assert_eq!(child.get("b"), Ok(int(6)));
        drop(child);
        assert_eq!(root.get("a"), Ok(int(5)));
        assert_eq!(root.get("b"), Ok(int(1)));
    }

    #[test]
    fn set_of_undefined_creates_nothing() {
        let root = Environment::new();
        let child = Environment::with_parent(&root);

        assert_eq!(
            root.set("y", int(5)),
            Err(SemanticError::UndefinedVariable("y".to_owned()))
        );
        assert_eq!(
            child.set("y", int(5)),
            Err(SemanticError::UndefinedVariable("y".to_owned()))
        );
        assert!(!root.is_defined("y"));
        assert!(!child.is_defined("y"));
    }

    #[test]
    fn get_of_undefined_is_an_error() {
        let root = Environment::new();
        assert_eq!(
            root.get("missing"),
            Err(SemanticError::UndefinedVariable("missing".to_owned()))
        );
    }

    #[test]
    fn redefinition_in_same_scope_is_rejected() {
        let mut root = Environment::new();
        root.define("x", int(1)).expect("fresh name");
        assert_eq!(
            root.define("x", int(2)),
            Err(SemanticError::AlreadyDefined("x".to_owned()))
        );
        assert_eq!(root.get("x"), Ok(int(1)));
    }

    #[test]
    fn located_errors_report_position() {
        let location = Location::new("prog.ml".into(), 4, 2);
        let err = SemanticError::UndefinedVariable("q".to_owned()).at(&location);
        assert_eq!(
            err.to_string(),
            "prog.ml:4:2: Semantic error: Variable 'q' is not defined."
        );
    }
}
