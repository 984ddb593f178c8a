use crate::error::EngineResult;
use crate::pipeline::{System, TurnContext};
use crate::world::{CommandInput, Flag, Inventory};

/// Answers `inv` and `inventory` with the player's inventory.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventorySystem;

impl System for InventorySystem {
    fn name(&self) -> &str {
        "inventory"
    }

    fn bypass_flag(&self) -> Option<Flag> {
        Some(Flag::BypassInventory)
    }

    fn run(&self, ctx: &mut TurnContext<'_>) -> EngineResult<()> {
        let player = ctx.player;
        let requests = ctx.take_markers_where(player, |c: &CommandInput| {
            matches!(c.tokens.command(), "inv" | "inventory")
        });
        for _ in requests {
            let summary = ctx
                .player_entity()?
                .find_first::<Inventory>()
                .map(|i| i.summary())
                .unwrap_or_default();
            if summary.is_empty() {
                ctx.output("You are not carrying anything.")?;
            } else {
                ctx.output(format!("inventory:\n{summary}"))?;
            }
        }
        Ok(())
    }
}
