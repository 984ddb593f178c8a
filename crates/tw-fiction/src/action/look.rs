use crate::error::EngineResult;
use crate::pipeline::TurnContext;
use crate::world::ShowDescription;

/// Queue the room, NPC list and exits for the description system.
pub(super) fn look(ctx: &mut TurnContext<'_>) -> EngineResult<()> {
    let player = ctx.player;
    let Some(room) = ctx.current_room() else {
        return ctx.output("There is nothing to see here");
    };
    for marker in [
        ShowDescription::Room(room),
        ShowDescription::Npcs(room),
        ShowDescription::Exits(room),
    ] {
        ctx.push_marker(player, marker)?;
    }
    Ok(())
}

pub(super) fn look_self(ctx: &mut TurnContext<'_>) -> EngineResult<()> {
    let player = ctx.player;
    ctx.push_marker(player, ShowDescription::Player(player))?;
    Ok(())
}
