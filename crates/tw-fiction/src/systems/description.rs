use crate::error::EngineResult;
use crate::pipeline::{System, TurnContext};
use crate::world::{Flag, ShowDescription, query};

/// Turns every queued [`ShowDescription`] into output text.
///
/// Markers are consumed whether or not they produce a line. An empty room
/// has no NPC line; exits always produce one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionSystem;

impl DescriptionSystem {
    fn text(ctx: &TurnContext<'_>, marker: ShowDescription) -> Option<String> {
        let world = &*ctx.world;
        match marker {
            ShowDescription::Room(room) => world
                .entity(room)
                .and_then(query::describe)
                .map(str::to_string),
            ShowDescription::Player(player) => world
                .entity(player)
                .and_then(query::describe)
                .map(|d| format!("looking intently at yourself: {d}")),
            ShowDescription::Npcs(room) => {
                let names: Vec<&str> = query::npcs_in_room(world, room)
                    .into_iter()
                    .map(|n| n.name())
                    .collect();
                if names.is_empty() {
                    None
                } else {
                    Some(format!("The following NPCs are here: {}", names.join(", ")))
                }
            }
            ShowDescription::Exits(room) => Some(query::exits_summary(world, room)),
        }
    }
}

impl System for DescriptionSystem {
    fn name(&self) -> &str {
        "description"
    }

    fn bypass_flag(&self) -> Option<Flag> {
        Some(Flag::BypassDescription)
    }

    fn run(&self, ctx: &mut TurnContext<'_>) -> EngineResult<()> {
        let player = ctx.player;
        for marker in ctx.take_markers::<ShowDescription>(player) {
            if let Some(text) = Self::text(ctx, marker) {
                ctx.output(text)?;
            }
        }
        Ok(())
    }
}
