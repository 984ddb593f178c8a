use super::{ActionRegistry, dialog, items, look};
use crate::error::EngineResult;
use crate::parser::CommandSet;
use crate::pipeline::TurnContext;
use crate::world::Quit;

/// Keys of the built-in actions.
pub mod keys {
    /// Queue a quit request.
    pub const QUIT: &str = "core.quit";
    /// Describe the current room, its NPCs and exits.
    pub const LOOK: &str = "core.look";
    /// Describe the player.
    pub const LOOK_SELF: &str = "core.look_self";
    /// Describe one item lying in the room.
    pub const SHOW: &str = "core.show";
    /// List every item lying in the room.
    pub const SHOW_ALL: &str = "core.show_all";
    /// Pick up one item.
    pub const TAKE: &str = "core.take";
    /// Pick up everything in the room.
    pub const TAKE_ALL: &str = "core.take_all";
    /// Put down one item.
    pub const DROP: &str = "core.drop";
    /// Put down the whole inventory.
    pub const DROP_ALL: &str = "core.drop_all";
    /// Use an item from the inventory.
    pub const USE: &str = "core.use";
    /// Start a conversation with an NPC.
    pub const TALK_TO: &str = "core.talk_to";
    /// Say something to the NPC being talked to.
    pub const SAY: &str = "core.say";
    /// End the session. Run by the quit system, not bound to a phrase.
    pub const END_SESSION: &str = "session.end";
}

/// The default vocabulary given to every player.
pub fn core_command_set() -> CommandSet {
    CommandSet::new()
        .with("quit", keys::QUIT)
        .with("look", keys::LOOK)
        .with("look self", keys::LOOK_SELF)
        .with("show", keys::SHOW)
        .with("show all", keys::SHOW_ALL)
        .with("inspect", keys::SHOW_ALL)
        .with("take", keys::TAKE)
        .with("take all", keys::TAKE_ALL)
        .with("drop", keys::DROP)
        .with("drop all", keys::DROP_ALL)
        .with("use", keys::USE)
        .with("talk to", keys::TALK_TO)
        .with("say", keys::SAY)
}

/// Register every built-in action.
pub fn register_core_actions(registry: &mut ActionRegistry) {
    registry.register(keys::QUIT, quit);
    registry.register(keys::END_SESSION, end_session);
    registry.register(keys::LOOK, look::look);
    registry.register(keys::LOOK_SELF, look::look_self);
    registry.register(keys::SHOW, items::show);
    registry.register(keys::SHOW_ALL, items::show_all);
    registry.register(keys::TAKE, items::take);
    registry.register(keys::TAKE_ALL, items::take_all);
    registry.register(keys::DROP, items::drop);
    registry.register(keys::DROP_ALL, items::drop_all);
    registry.register(keys::USE, items::use_item);
    registry.register(keys::TALK_TO, dialog::talk_to);
    registry.register(keys::SAY, dialog::say);
}

fn quit(ctx: &mut TurnContext<'_>) -> EngineResult<()> {
    let player = ctx.player;
    ctx.push_marker(
        player,
        Quit {
            action: keys::END_SESSION.into(),
        },
    )?;
    Ok(())
}

fn end_session(ctx: &mut TurnContext<'_>) -> EngineResult<()> {
    ctx.request_quit();
    Ok(())
}
