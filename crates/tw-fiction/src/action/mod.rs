//! Action keys, the action registry, and the built-in verbs.
//!
//! World data never stores behaviour directly. Command sets, item action
//! tables, dialog responses and quit markers hold an [`ActionKey`], which is
//! looked up in an [`ActionRegistry`] when the action fires.

mod dialog;
mod items;
mod look;
mod verbs;

use std::collections::HashMap;
use std::fmt;

use crate::error::{EngineError, EngineResult};
use crate::pipeline::TurnContext;

pub use verbs::{core_command_set, keys, register_core_actions};

/// String identifier of a registered action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionKey(String);

impl ActionKey {
    /// Create a key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ActionKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// The behaviour behind an [`ActionKey`].
pub type ActionFn = dyn Fn(&mut TurnContext<'_>) -> EngineResult<()>;

/// Table of actions, resolved by key at call time.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<ActionKey, Box<ActionFn>>,
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.actions.keys().map(ActionKey::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ActionRegistry").field("keys", &keys).finish()
    }
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in verb.
    pub fn with_core_actions() -> Self {
        let mut registry = Self::new();
        register_core_actions(&mut registry);
        registry
    }

    /// Register (or replace) an action.
    pub fn register<F>(&mut self, key: impl Into<ActionKey>, action: F)
    where
        F: Fn(&mut TurnContext<'_>) -> EngineResult<()> + 'static,
    {
        self.actions.insert(key.into(), Box::new(action));
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &ActionKey) -> bool {
        self.actions.contains_key(key)
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run the action registered under `key`.
    pub fn invoke(&self, key: &ActionKey, ctx: &mut TurnContext<'_>) -> EngineResult<()> {
        let action = self
            .actions
            .get(key)
            .ok_or_else(|| EngineError::UnknownAction(key.clone()))?;
        action(ctx)
    }
}
