use tracing::debug;
use tw_core::ComponentId;

use crate::error::EngineResult;
use crate::parser::{CommandSet, CommandTokens, Resolution};
use crate::pipeline::{System, TurnContext};
use crate::world::{CommandAction, CommandInput, Flag};

/// Resolves pending input against the player's command set, falling back to
/// the current room's set, and runs the bound action.
///
/// The action sees the resolved command as a [`CommandAction`] marker for the
/// duration of the call. Input that resolves nowhere is left in place for
/// the movement, inventory and unknown-command systems.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandDispatchSystem;

impl CommandDispatchSystem {
    fn resolve(ctx: &TurnContext<'_>, tokens: &CommandTokens) -> Option<Resolution> {
        let own = ctx
            .player_entity()
            .ok()?
            .find_first::<CommandSet>()
            .and_then(|set| set.resolve(tokens));
        own.or_else(|| {
            let room = ctx.current_room()?;
            ctx.world
                .entity(room)?
                .find_first::<CommandSet>()?
                .resolve(tokens)
        })
    }
}

impl System for CommandDispatchSystem {
    fn name(&self) -> &str {
        "command dispatch"
    }

    fn bypass_flag(&self) -> Option<Flag> {
        Some(Flag::BypassCommandDispatch)
    }

    fn run(&self, ctx: &mut TurnContext<'_>) -> EngineResult<()> {
        let player = ctx.player;
        let pending: Vec<(ComponentId, CommandTokens)> = ctx
            .player_entity()?
            .find_all::<CommandInput>()
            .iter()
            .map(|c| (c.id, c.tokens.clone()))
            .collect();

        for (id, tokens) in pending {
            let Some(Resolution { phrase, action }) = Self::resolve(ctx, &tokens) else {
                debug!(input = tokens.raw(), "no command matched");
                continue;
            };
            let Some(input) = ctx.take_marker::<CommandInput>(player, id) else {
                continue;
            };
            debug!(input = input.tokens.raw(), %phrase, %action, "dispatching command");

            let marker = ctx.push_marker(
                player,
                CommandAction {
                    tokens: input.tokens,
                    phrase,
                    action: action.clone(),
                },
            )?;
            let result = ctx.invoke(&action);
            ctx.take_marker::<CommandAction>(player, marker);
            result?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::MarkerKind;
    use crate::testing::{Fixture, outputs};

    #[test]
    fn resolved_input_runs_action_and_is_consumed() {
        let mut fx = Fixture::new();
        fx.push_input("take lamp");
        let out = fx.run_system(&CommandDispatchSystem, None);
        assert_eq!(outputs(&out), ["You've taken Lamp"]);
        assert_eq!(fx.pending_inputs(), 0);
        assert_eq!(fx.world.entity(fx.player).unwrap().count::<CommandAction>(), 0);
        assert_eq!(fx.markers.unconsumed(1, MarkerKind::CommandAction), 0);
    }

    #[test]
    fn unresolved_input_is_left_alone() {
        let mut fx = Fixture::new();
        fx.push_input("east");
        fx.push_input("dance wildly");
        assert!(fx.run_system(&CommandDispatchSystem, None).is_empty());
        assert_eq!(fx.pending_inputs(), 2);
    }

    #[test]
    fn exact_phrase_beats_prefix() {
        let mut fx = Fixture::new();
        fx.push_input("take all");
        let out = fx.run_system(&CommandDispatchSystem, None);
        assert!(outputs(&out)[0].starts_with("You've taken the following items:"));
    }

    #[test]
    fn room_command_set_is_the_fallback() {
        let mut fx = Fixture::new();
        fx.actions.register("test.pray", |ctx| ctx.output("You feel at peace"));
        fx.world
            .entity_mut(fx.room)
            .unwrap()
            .add("command set", CommandSet::new().with("pray", "test.pray").with("look", "test.pray"));

        fx.push_input("pray");
        let out = fx.run_system(&CommandDispatchSystem, None);
        assert_eq!(outputs(&out), ["You feel at peace"]);

        // the player's own set wins when both match
        fx.push_input("look");
        assert!(fx.run_system(&CommandDispatchSystem, None).is_empty());
        assert_eq!(fx.pending_inputs(), 0);
    }

    #[test]
    fn action_sees_command_remainder() {
        let mut fx = Fixture::new();
        fx.actions.register("test.echo", |ctx| {
            let remainder = ctx.command().map(|c| c.remainder()).unwrap_or_default();
            ctx.output(remainder)
        });
        fx.world
            .entity_mut(fx.player)
            .unwrap()
            .first_mut::<CommandSet>()
            .unwrap()
            .insert("wave at", "test.echo");
        fx.push_input("wave at The Old Man");
        let out = fx.run_system(&CommandDispatchSystem, None);
        assert_eq!(outputs(&out), ["the old man"]);
    }
}
