//! Error types for the runtime.
//!
//! Only broken invariants end up here. A missing item or an unknown command
//! is reported to the player as output and never becomes an error.

use thiserror::Error;
use tw_core::{CoreError, EntityId};

use crate::action::ActionKey;

/// Result type for runtime operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that abort a turn or reject a world.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The player entity the pipeline was asked to run for does not exist.
    #[error("player entity not found: {0}")]
    PlayerNotFound(EntityId),

    /// A marker was addressed to an entity that does not exist.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// World data refers to an action that was never registered.
    #[error("no action registered for key \"{0}\"")]
    UnknownAction(ActionKey),

    /// The world graph is inconsistent.
    #[error("invalid world: {0}")]
    InvalidWorld(String),

    /// The session has already ended.
    #[error("session has finished")]
    SessionFinished,

    /// Store error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration could not be read.
    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),
}
