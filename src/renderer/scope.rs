//! The shared variable scope of one render pass
//!
//! One flat name→value store shared by interpolations, helper arguments,
//! and cycle cursors. Helpers that expose a value to their children do so
//! through [`Scope::bind`]/[`Scope::unbind`], which shadow an existing
//! name for the duration and restore it afterwards instead of deleting it.

use crate::value::Value;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Scope {
    variables: HashMap<String, Value>,
}

/// Receipt for one [`Scope::bind`] call; hand it back to
/// [`Scope::unbind`] to release the binding
#[derive(Debug)]
pub struct ScopeBinding {
    name: String,
    shadowed: Option<Value>,
}

impl Scope {
    pub fn new() -> Self {
        Scope {
            variables: HashMap::new(),
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn add(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.variables.remove(name)
    }

    /// Names currently visible, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Expose `value` under `name`, shadowing any existing value
    ///
    /// The returned receipt must be passed to [`Scope::unbind`] once the
    /// content that should see the binding has finished rendering,
    /// whether it succeeded or failed.
    pub fn bind(&mut self, name: &str, value: Value) -> ScopeBinding {
        let shadowed = self.variables.insert(name.to_string(), value);
        ScopeBinding {
            name: name.to_string(),
            shadowed,
        }
    }

    /// Release a binding: restore the shadowed value, or remove the name
    /// if nothing was shadowed
    pub fn unbind(&mut self, binding: ScopeBinding) {
        match binding.shadowed {
            Some(previous) => {
                self.variables.insert(binding.name, previous);
            }
            None => {
                self.variables.remove(&binding.name);
            }
        }
    }
}
