use tracing::debug;

use crate::error::EngineResult;
use crate::pipeline::{System, TurnContext};
use crate::world::CommandInput;

/// Discards input nothing else handled, with one message per turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownCommandSystem;

impl System for UnknownCommandSystem {
    fn name(&self) -> &str {
        "unknown command"
    }

    fn run(&self, ctx: &mut TurnContext<'_>) -> EngineResult<()> {
        let player = ctx.player;
        let unhandled = ctx.take_markers::<CommandInput>(player);
        if unhandled.is_empty() {
            return Ok(());
        }
        for input in &unhandled {
            debug!(input = input.tokens.raw(), "unknown command");
        }
        ctx.output("I don't know how to do that")
    }
}
