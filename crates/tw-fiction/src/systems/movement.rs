use tracing::debug;
use tw_core::ComponentId;

use crate::error::EngineResult;
use crate::pipeline::{System, TurnContext};
use crate::world::{
    CommandInput, CurrentRoom, Direction, Flag, ShowDescription, end_engagement, query,
};

/// Moves the player when the command word names a direction.
///
/// A successful move queues the new room's description, NPC list and exits.
/// Any movement attempt ends a conversation with an NPC.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomMovementSystem;

impl System for RoomMovementSystem {
    fn name(&self) -> &str {
        "room movement"
    }

    fn bypass_flag(&self) -> Option<Flag> {
        Some(Flag::BypassRoomMovement)
    }

    fn run(&self, ctx: &mut TurnContext<'_>) -> EngineResult<()> {
        let player = ctx.player;
        let moves: Vec<(ComponentId, Direction)> = ctx
            .player_entity()?
            .find_all::<CommandInput>()
            .iter()
            .filter_map(|c| Direction::parse(c.tokens.command()).map(|d| (c.id, d)))
            .collect();
        if moves.is_empty() {
            return Ok(());
        }

        for (id, direction) in moves {
            ctx.take_marker::<CommandInput>(player, id);
            let exit = ctx
                .current_room()
                .and_then(|room| query::exit_towards(ctx.world, room, direction));
            let Some(exit) = exit else {
                ctx.output("I cannot go in that direction")?;
                continue;
            };

            if let Some(current) = ctx.player_entity_mut()?.first_mut::<CurrentRoom>() {
                current.room = exit.room;
            }
            debug!(%direction, room = %exit.room_name, "player moved");
            for marker in [
                ShowDescription::Room(exit.room),
                ShowDescription::Npcs(exit.room),
                ShowDescription::Exits(exit.room),
            ] {
                ctx.push_marker(player, marker)?;
            }
        }

        end_engagement(ctx.player_entity_mut()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::keys;
    use crate::testing::{Fixture, outputs};
    use crate::world::engaged_npc;

    fn queued(fx: &Fixture) -> Vec<ShowDescription> {
        fx.world
            .entity(fx.player)
            .unwrap()
            .find_all::<ShowDescription>()
            .iter()
            .map(|m| *m.value)
            .collect()
    }

    #[test]
    fn move_east_and_back() {
        let mut fx = Fixture::new();
        fx.push_input("east");
        assert!(fx.run_system(&RoomMovementSystem, None).is_empty());
        assert_eq!(fx.current_room(), Some(fx.stream));
        assert_eq!(
            queued(&fx),
            vec![
                ShowDescription::Room(fx.stream),
                ShowDescription::Npcs(fx.stream),
                ShowDescription::Exits(fx.stream),
            ]
        );

        fx.push_input("WEST");
        fx.run_system(&RoomMovementSystem, None);
        assert_eq!(fx.current_room(), Some(fx.room));
        assert_eq!(fx.pending_inputs(), 0);
    }

    #[test]
    fn blocked_direction() {
        let mut fx = Fixture::new();
        fx.push_input("north");
        let out = fx.run_system(&RoomMovementSystem, None);
        assert_eq!(outputs(&out), ["I cannot go in that direction"]);
        assert_eq!(fx.current_room(), Some(fx.room));
        assert_eq!(fx.pending_inputs(), 0);
    }

    #[test]
    fn non_directions_are_left_alone() {
        let mut fx = Fixture::new();
        fx.push_input("eastward");
        fx.push_input("take lamp");
        assert!(fx.run_system(&RoomMovementSystem, None).is_empty());
        assert_eq!(fx.pending_inputs(), 2);
    }

    #[test]
    fn moving_ends_conversation() {
        let mut fx = Fixture::new();
        fx.run(keys::TALK_TO, "talk to old man");
        assert!(engaged_npc(fx.world.entity(fx.player).unwrap()).is_some());
        fx.push_input("north");
        fx.run_system(&RoomMovementSystem, None);
        assert!(engaged_npc(fx.world.entity(fx.player).unwrap()).is_none());
    }

    #[test]
    fn hidden_exit_can_be_taken() {
        let mut fx = Fixture::new();
        let (room, stream) = (fx.room, fx.stream);
        fx.world.entity_mut(room).unwrap().add(
            "exit",
            crate::world::Exit {
                direction: Direction::Down,
                room: stream,
                room_name: "Stream".into(),
                hidden: true,
            },
        );
        fx.push_input("down");
        fx.run_system(&RoomMovementSystem, None);
        assert_eq!(fx.current_room(), Some(stream));
    }
}
