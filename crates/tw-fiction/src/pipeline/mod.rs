//! The turn pipeline: system trait, turn context, and marker audit log.

mod context;
mod marker;
mod system;
mod turn;

pub use context::TurnContext;
pub use marker::{Marker, MarkerAction, MarkerEvent, MarkerKind, MarkerLog};
pub use system::System;
pub use turn::{OutputLine, Pipeline, TurnOutcome};
