use crate::error::EngineResult;
use crate::pipeline::{System, TurnContext};
use crate::world::{Description, MOTD, OutputKind};

/// Shows the player's message of the day once, then deletes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotdSystem;

impl System for MotdSystem {
    fn name(&self) -> &str {
        "motd"
    }

    fn run(&self, ctx: &mut TurnContext<'_>) -> EngineResult<()> {
        let player = ctx.player_entity_mut()?;
        let Some(id) = player
            .find_first_by_name::<Description>(MOTD)
            .map(|d| d.id)
        else {
            return Ok(());
        };
        let Some(motd) = player.take::<Description>(id) else {
            return Ok(());
        };
        ctx.output_as(OutputKind::MessageOfTheDay, motd.text)
    }
}
