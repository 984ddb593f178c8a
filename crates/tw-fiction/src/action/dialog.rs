//! Talking to NPCs.

use tracing::debug;
use tw_core::GroupName;

use super::items::argument;
use crate::error::EngineResult;
use crate::pipeline::TurnContext;
use crate::world::{Dialog, Flags, end_engagement, engaged_npc, query};

const TALKING_TO_SELF: &str =
    "You feel foolish talking to yourself and you look around to see if anyone saw you...";

pub(super) fn talk_to(ctx: &mut TurnContext<'_>) -> EngineResult<()> {
    let name = argument(ctx);
    end_engagement(ctx.player_entity_mut()?);

    let npc = ctx.current_room().and_then(|room| {
        query::npcs_in_room(ctx.world, room)
            .into_iter()
            .find(|n| n.name().eq_ignore_ascii_case(&name))
            .map(|n| (n.id(), n.name().to_string()))
    });
    let Some((npc, npc_name)) = npc else {
        return ctx.output("That NPC is not here...");
    };

    debug!(%npc, "dialog engaged");
    ctx.player_entity_mut()?
        .add("npc engagement", Flags::engaged_with(npc));
    ctx.output(format!("Talking to {npc_name}"))
}

pub(super) fn say(ctx: &mut TurnContext<'_>) -> EngineResult<()> {
    let phrase = argument(ctx);
    let Some(npc) = engaged_npc(ctx.player_entity()?) else {
        return ctx.output(TALKING_TO_SELF);
    };
    let Some(npc_entity) = ctx.world.get_entity_by_id(GroupName::Npcs, npc) else {
        end_engagement(ctx.player_entity_mut()?);
        return ctx.output(TALKING_TO_SELF);
    };
    let npc_name = npc_entity.name().to_string();
    let response = npc_entity
        .find_first::<Dialog>()
        .and_then(|d| d.respond(&phrase).cloned());

    if phrase.is_empty() {
        return ctx.output("You try to talk but nothing comes out of your mouth...");
    }
    if phrase == "bye" || phrase == "goodbye" {
        end_engagement(ctx.player_entity_mut()?);
        debug!(%npc, "dialog ended");
        return ctx.output(format!("{npc_name}: Bye!"));
    }
    match response {
        Some(response) => {
            ctx.output(format!("{npc_name}: {}", response.text))?;
            if let Some(action) = &response.action {
                ctx.invoke(action)?;
            }
            Ok(())
        }
        None => ctx.output(format!("{npc_name}: I don't understand...")),
    }
}

#[cfg(test)]
mod tests {
    use crate::action::keys;
    use crate::testing::{Fixture, outputs};
    use crate::world::engaged_npc;

    #[test]
    fn talk_to_present_npc() {
        let mut fx = Fixture::new();
        let out = fx.run(keys::TALK_TO, "talk to old man");
        assert_eq!(outputs(&out), ["Talking to Old Man"]);
        assert_eq!(engaged_npc(fx.world.entity(fx.player).unwrap()), Some(fx.npc));
    }

    #[test]
    fn talk_to_absent_npc() {
        let mut fx = Fixture::new();
        let out = fx.run(keys::TALK_TO, "talk to ghost");
        assert_eq!(outputs(&out), ["That NPC is not here..."]);
        let out = fx.run(keys::TALK_TO, "talk to");
        assert_eq!(outputs(&out), ["That NPC is not here..."]);
        assert_eq!(engaged_npc(fx.world.entity(fx.player).unwrap()), None);
    }

    #[test]
    fn say_without_engagement() {
        let mut fx = Fixture::new();
        let out = fx.run(keys::SAY, "say hello");
        assert_eq!(
            outputs(&out),
            ["You feel foolish talking to yourself and you look around to see if anyone saw you..."]
        );
    }

    #[test]
    fn say_responses() {
        let mut fx = Fixture::new();
        fx.run(keys::TALK_TO, "talk to old man");

        let out = fx.run(keys::SAY, "say Hello");
        assert_eq!(outputs(&out), ["Old Man: Hi there!"]);

        let out = fx.run(keys::SAY, "say weather");
        assert_eq!(outputs(&out), ["Old Man: I don't understand..."]);

        let out = fx.run(keys::SAY, "say");
        assert_eq!(
            outputs(&out),
            ["You try to talk but nothing comes out of your mouth..."]
        );
    }

    #[test]
    fn say_runs_response_action() {
        let mut fx = Fixture::new();
        fx.run(keys::TALK_TO, "talk to old man");
        let out = fx.run(keys::SAY, "say quest");
        assert_eq!(outputs(&out), ["Old Man: Take this.", "You received 100 gold"]);
        assert_eq!(fx.gold(), 100);
    }

    #[test]
    fn say_goodbye_ends_engagement() {
        let mut fx = Fixture::new();
        fx.run(keys::TALK_TO, "talk to old man");
        let out = fx.run(keys::SAY, "say goodbye");
        assert_eq!(outputs(&out), ["Old Man: Bye!"]);
        assert_eq!(engaged_npc(fx.world.entity(fx.player).unwrap()), None);
        let out = fx.run(keys::SAY, "say hello");
        assert_eq!(outputs(&out).len(), 1);
        assert!(outputs(&out)[0].starts_with("You feel foolish"));
    }
}
