//! Game session: a validated world, its actions, and the turn pipeline for
//! one player.

use tracing::{debug, info};
use tw_core::{EntityId, EntityManager};

use crate::action::{ActionKey, ActionRegistry};
use crate::config::GameConfig;
use crate::error::{EngineError, EngineResult};
use crate::parser::CommandSet;
use crate::pipeline::{MarkerLog, Pipeline, TurnOutcome};
use crate::world::{Dialog, Item, Quit, validate_world};

/// A running game for one player.
///
/// Construction checks the world graph and that every action key stored in
/// world data has a registered action, so a turn never fails on a dangling
/// reference.
#[derive(Debug)]
pub struct GameSession {
    world: EntityManager,
    actions: ActionRegistry,
    pipeline: Pipeline,
    player: EntityId,
    finished: bool,
}

impl GameSession {
    /// Create a session running the standard pipeline.
    pub fn new(
        world: EntityManager,
        actions: ActionRegistry,
        player: EntityId,
        config: GameConfig,
    ) -> EngineResult<Self> {
        Self::with_pipeline(world, actions, player, Pipeline::standard(config))
    }

    /// Create a session with a custom pipeline.
    pub fn with_pipeline(
        world: EntityManager,
        actions: ActionRegistry,
        player: EntityId,
        pipeline: Pipeline,
    ) -> EngineResult<Self> {
        validate_world(&world)?;
        if world.entity(player).is_none() {
            return Err(EngineError::PlayerNotFound(player));
        }
        for key in referenced_actions(&world) {
            if !actions.contains(&key) {
                return Err(EngineError::UnknownAction(key));
            }
        }
        info!(%player, systems = ?pipeline.system_names(), "session created");
        Ok(Self {
            world,
            actions,
            pipeline,
            player,
            finished: false,
        })
    }

    /// Run the opening turn: message of the day and the starting room.
    pub fn start(&mut self) -> EngineResult<TurnOutcome> {
        self.turn(None)
    }

    /// Run one turn with a line of player input.
    pub fn submit(&mut self, line: &str) -> EngineResult<TurnOutcome> {
        self.turn(Some(line))
    }

    /// Whether the player has quit.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The world state.
    pub fn world(&self) -> &EntityManager {
        &self.world
    }

    /// Mutable world state, for scripted changes between turns.
    pub fn world_mut(&mut self) -> &mut EntityManager {
        &mut self.world
    }

    /// The player this session runs for.
    pub fn player(&self) -> EntityId {
        self.player
    }

    /// The turn pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Every marker produced and consumed so far.
    pub fn markers(&self) -> &MarkerLog {
        self.pipeline.markers()
    }

    fn turn(&mut self, input: Option<&str>) -> EngineResult<TurnOutcome> {
        if self.finished {
            return Err(EngineError::SessionFinished);
        }
        let outcome = self
            .pipeline
            .run_turn(&mut self.world, &self.actions, self.player, input)?;
        if outcome.quit_requested {
            info!(turn = outcome.turn, "session finished");
            self.finished = true;
        }
        Ok(outcome)
    }
}

/// Every action key stored in world data: command sets, item action tables,
/// dialog responses and pending quit markers.
fn referenced_actions(world: &EntityManager) -> Vec<ActionKey> {
    let mut keys = Vec::new();
    for group in world.group_names() {
        for entity in world.entities(group) {
            for set in entity.find_all::<CommandSet>() {
                keys.extend(set.value.actions().cloned());
            }
            for item in entity.find_all::<Item>() {
                keys.extend(item.value.actions.values().cloned());
            }
            for dialog in entity.find_all::<Dialog>() {
                keys.extend(dialog.value.actions().cloned());
            }
            for quit in entity.find_all::<Quit>() {
                keys.push(quit.value.action.clone());
            }
        }
    }
    keys.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    keys.dedup();
    debug!(count = keys.len(), "collected referenced actions");
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Direction, OutputKind, QuestionSequence, WorldBuilder};

    fn demo() -> (EntityManager, EntityId) {
        let mut builder = WorldBuilder::new();
        let field = builder.room("Open Field", "You are standing in an open field.");
        let stream = builder.room("Stream", "A cool stream runs past.");
        builder.two_way_exit(field, Direction::East, stream);
        let player = builder.player("player", "A traveller.", field);
        builder.motd(player, "Welcome to Textworld");
        (builder.build().unwrap(), player)
    }

    fn session() -> GameSession {
        let (world, player) = demo();
        GameSession::new(world, ActionRegistry::with_core_actions(), player, GameConfig::default())
            .unwrap()
    }

    #[test]
    fn start_shows_motd_and_room() {
        let mut s = session();
        let outcome = s.start().unwrap();
        assert_eq!(
            outcome.texts(),
            [
                "-[ Welcome to Textworld ]-",
                "You are standing in an open field.",
                "Exits: [East : Stream]",
            ]
        );
        assert_eq!(outcome.turn, 1);
    }

    #[test]
    fn motd_is_shown_once() {
        let mut s = session();
        s.start().unwrap();
        let outcome = s.submit("look").unwrap();
        assert!(outcome.texts_of(OutputKind::MessageOfTheDay).is_empty());
        assert_eq!(outcome.texts()[0], "> look");
    }

    #[test]
    fn quit_finishes_session() {
        let mut s = session();
        s.start().unwrap();
        let outcome = s.submit("quit").unwrap();
        assert!(outcome.quit_requested);
        assert!(s.is_finished());
        assert!(matches!(s.submit("look"), Err(EngineError::SessionFinished)));
    }

    #[test]
    fn unregistered_action_is_rejected() {
        let (world, player) = demo();
        let err = GameSession::new(world, ActionRegistry::new(), player, GameConfig::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownAction(_)));
    }

    #[test]
    fn unregistered_item_action_is_rejected() {
        let mut builder = WorldBuilder::new();
        let field = builder.room("Open Field", "A field.");
        let player = builder.player("player", "A traveller.", field);
        let coin = builder.item(Item::new("Coin", "Shiny.").on_use("demo.spend"));
        builder.place_item(field, coin, 1);
        let world = builder.build().unwrap();
        let err = GameSession::new(world, ActionRegistry::with_core_actions(), player, GameConfig::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownAction(ref k) if k.as_str() == "demo.spend"));
    }

    #[test]
    fn missing_player_is_rejected() {
        let (world, _) = demo();
        let err = GameSession::new(
            world,
            ActionRegistry::with_core_actions(),
            EntityId::from_raw(999),
            GameConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::PlayerNotFound(_)));
    }

    #[test]
    fn questions_are_asked_across_turns() {
        let (mut world, player) = demo();
        world
            .entity_mut(player)
            .unwrap()
            .add("question sequence", QuestionSequence::new(["What is your name?"]));
        let mut s = GameSession::new(world, ActionRegistry::with_core_actions(), player, GameConfig::default())
            .unwrap();
        let opening = s.start().unwrap();
        assert!(opening.texts().contains(&"What is your name?"));
        let answer = s.submit("Frank").unwrap();
        assert!(answer.texts().contains(&"You answered with: Frank"));
        assert!(!answer.texts().contains(&"I don't know how to do that"));
    }

    #[test]
    fn markers_balance_every_turn() {
        let mut s = session();
        s.start().unwrap();
        for line in ["look", "east", "dance", "inv", "west"] {
            let turn = s.submit(line).unwrap().turn;
            for kind in [
                crate::MarkerKind::CommandInput,
                crate::MarkerKind::CommandAction,
                crate::MarkerKind::Output,
            ] {
                assert_eq!(s.markers().unconsumed(turn, kind), 0, "{line}: {kind}");
            }
        }
    }
}
