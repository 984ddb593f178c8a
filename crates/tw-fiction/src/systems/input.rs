use tracing::trace;

use crate::error::EngineResult;
use crate::parser::tokenize;
use crate::pipeline::{System, TurnContext};
use crate::world::{CommandInput, OutputKind};

/// Turns the submitted line into a [`CommandInput`] on the player, echoing
/// it first when configured to. Blank lines are dropped here.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSystem;

impl System for InputSystem {
    fn name(&self) -> &str {
        "input"
    }

    fn run(&self, ctx: &mut TurnContext<'_>) -> EngineResult<()> {
        let Some(line) = ctx.input() else {
            return Ok(());
        };
        let tokens = tokenize(line);
        if tokens.is_empty() {
            trace!("blank input discarded");
            return Ok(());
        }
        if ctx.config.echo_commands {
            ctx.output_as(OutputKind::Command, tokens.raw())?;
        }
        let player = ctx.player;
        ctx.push_marker(player, CommandInput { tokens })?;
        Ok(())
    }
}
