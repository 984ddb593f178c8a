//! Text-adventure runtime for Textworld.
//!
//! A game turn is one ordered pass of [`System`]s over a single player. Raw
//! input becomes a [`CommandInput`](world::CommandInput) marker, the dispatch
//! system resolves it against the player's [`CommandSet`] and runs the
//! registered action, and later systems consume the markers that action left
//! behind (descriptions to show, output to print, a quit request). Every
//! produce/consume is recorded in a [`MarkerLog`].
//!
//! Worlds are assembled with [`WorldBuilder`] and played through a
//! [`GameSession`].

/// Action keys, the action registry, and the built-in verbs.
pub mod action;
/// Configuration types for a game session.
pub mod config;
/// Error types for the runtime.
pub mod error;
/// Input tokenizing and command resolution.
pub mod parser;
/// The turn pipeline: system trait, turn context, and marker audit log.
pub mod pipeline;
/// Session management.
pub mod session;
/// The systems run each turn.
pub mod systems;
/// Game components, world queries, and world construction.
pub mod world;

#[cfg(test)]
mod testing;

pub use action::{ActionKey, ActionRegistry};
pub use config::GameConfig;
pub use error::{EngineError, EngineResult};
pub use parser::{CommandSet, CommandTokens, Resolution, tokenize};
pub use pipeline::{
    Marker, MarkerEvent, MarkerKind, MarkerLog, OutputLine, Pipeline, System, TurnContext,
    TurnOutcome,
};
pub use session::GameSession;
pub use world::{Direction, WorldBuilder};
