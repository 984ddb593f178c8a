use crate::error::EngineResult;
use crate::pipeline::TurnContext;
use crate::world::Flag;

/// One step of a game turn.
///
/// Systems hold no state of their own; everything they read or write lives
/// on entities reachable from the context. They run once per turn in
/// registration order.
pub trait System: std::fmt::Debug {
    /// Human-readable name for this system.
    fn name(&self) -> &str;

    /// A flag that, when set on the player, skips this system for the turn.
    fn bypass_flag(&self) -> Option<Flag> {
        None
    }

    /// Called once per turn.
    fn run(&self, ctx: &mut TurnContext<'_>) -> EngineResult<()>;
}
