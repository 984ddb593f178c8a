//! Command tables and phrase resolution.

use std::collections::HashMap;

use tracing::trace;

use super::tokenizer::CommandTokens;
use crate::action::ActionKey;

/// A mapping from literal command phrases to action keys.
///
/// Phrases may contain spaces (`"take all"`). Each player, and optionally
/// each room, owns its own set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSet {
    commands: HashMap<String, ActionKey>,
}

/// A successful resolution: the phrase that matched and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The phrase found in the set.
    pub phrase: String,
    /// The action bound to it.
    pub action: ActionKey,
}

impl CommandSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in vocabulary. See [`crate::action::core_command_set`].
    pub fn core() -> Self {
        crate::action::core_command_set()
    }

    /// Bind `phrase` to `action`, returning the previous binding.
    pub fn insert(&mut self, phrase: impl Into<String>, action: impl Into<ActionKey>) -> Option<ActionKey> {
        self.commands.insert(phrase.into(), action.into())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, phrase: impl Into<String>, action: impl Into<ActionKey>) -> Self {
        self.insert(phrase, action);
        self
    }

    /// Remove a binding.
    pub fn remove(&mut self, phrase: &str) -> Option<ActionKey> {
        self.commands.remove(phrase)
    }

    /// The action bound to exactly this phrase.
    pub fn get(&self, phrase: &str) -> Option<&ActionKey> {
        self.commands.get(phrase)
    }

    /// Whether exactly this phrase is bound.
    pub fn contains(&self, phrase: &str) -> bool {
        self.commands.contains_key(phrase)
    }

    /// Every bound phrase, sorted.
    pub fn phrases(&self) -> Vec<&str> {
        let mut phrases: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        phrases.sort_unstable();
        phrases
    }

    /// Every action referenced by this set.
    pub fn actions(&self) -> impl Iterator<Item = &ActionKey> {
        self.commands.values()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the set has no bindings.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Resolve tokenized input against this set.
    pub fn resolve(&self, tokens: &CommandTokens) -> Option<Resolution> {
        resolve(self, tokens.command_with_arguments(), &tokens.tokens())
    }
}

/// Resolve a command against a set.
///
/// The full phrase is tried first. Failing that, tokens are joined one at a
/// time and each prefix is tried, never including the final token; the
/// shortest prefix that is bound wins.
pub fn resolve(set: &CommandSet, full: &str, tokens: &[&str]) -> Option<Resolution> {
    if tokens.is_empty() {
        return None;
    }
    if let Some(action) = set.get(full) {
        trace!(phrase = full, %action, "exact command match");
        return Some(Resolution {
            phrase: full.to_string(),
            action: action.clone(),
        });
    }

    let mut accumulated = String::new();
    for token in &tokens[..tokens.len() - 1] {
        accumulated.push_str(token);
        if let Some(action) = set.get(&accumulated) {
            trace!(phrase = %accumulated, %action, "prefix command match");
            return Some(Resolution {
                phrase: accumulated,
                action: action.clone(),
            });
        }
        accumulated.push(' ');
    }
    None
}
