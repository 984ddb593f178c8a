use tracing::{debug, trace};
use tw_core::{EntityId, EntityManager};

use super::context::TurnContext;
use super::marker::MarkerLog;
use super::system::System;
use crate::action::ActionRegistry;
use crate::config::GameConfig;
use crate::error::{EngineError, EngineResult};
use crate::systems::{
    CommandDispatchSystem, DescriptionSystem, InputSystem, InventorySystem, MotdSystem,
    OutputFlushSystem, QuestionResponseSystem, QuitSystem, RoomMovementSystem,
    UnknownCommandSystem,
};
use crate::world::{Output, OutputKind, has_flag};

/// A rendered line handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// What kind of output produced this line.
    pub kind: OutputKind,
    /// The text, already formatted for its kind.
    pub text: String,
}

impl OutputLine {
    /// Format an output marker by its kind.
    pub fn render(output: &Output) -> Self {
        let text = match output.kind {
            OutputKind::Regular => output.text.clone(),
            OutputKind::MessageOfTheDay => format!("-[ {} ]-", output.text),
            OutputKind::Command => format!("> {}", output.text),
            OutputKind::Separator => String::new(),
        };
        Self {
            kind: output.kind,
            text,
        }
    }
}

/// What a turn produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Turn number, starting at 1.
    pub turn: u64,
    /// Rendered output, in the order it was queued.
    pub lines: Vec<OutputLine>,
    /// Whether a quit action ran.
    pub quit_requested: bool,
}

impl TurnOutcome {
    /// Text of every line.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    /// Text of the lines of one kind.
    pub fn texts_of(&self, kind: OutputKind) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| l.text.as_str())
            .collect()
    }
}

/// An ordered list of systems run once per turn against one player.
pub struct Pipeline {
    systems: Vec<Box<dyn System>>,
    config: GameConfig,
    markers: MarkerLog,
    turn: u64,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("turn", &self.turn)
            .field("systems", &self.system_names())
            .field("markers", &self.markers.len())
            .finish()
    }
}

impl Pipeline {
    /// A pipeline with no systems.
    pub fn new(config: GameConfig) -> Self {
        let markers = MarkerLog::new(config.max_marker_events);
        Self {
            systems: Vec::new(),
            config,
            markers,
            turn: 0,
        }
    }

    /// The full game loop: input, message of the day, command dispatch,
    /// questions, quit, movement, descriptions, inventory, unknown commands,
    /// then output.
    pub fn standard(config: GameConfig) -> Self {
        Self::new(config)
            .with_system(InputSystem)
            .with_system(MotdSystem)
            .with_system(CommandDispatchSystem)
            .with_system(QuestionResponseSystem)
            .with_system(QuitSystem)
            .with_system(RoomMovementSystem)
            .with_system(DescriptionSystem)
            .with_system(InventorySystem)
            .with_system(UnknownCommandSystem)
            .with_system(OutputFlushSystem)
    }

    /// Register a system. Systems run in registration order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
    }

    /// Builder form of [`add_system`](Self::add_system).
    pub fn with_system<S: System + 'static>(mut self, system: S) -> Self {
        self.add_system(system);
        self
    }

    /// Names of the registered systems, in run order.
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// The session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Every marker produced and consumed so far.
    pub fn markers(&self) -> &MarkerLog {
        &self.markers
    }

    /// Number of turns run.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Run every system once for `player`.
    ///
    /// A system whose bypass flag is set on the player is skipped. An error
    /// from any system aborts the rest of the turn.
    pub fn run_turn(
        &mut self,
        world: &mut EntityManager,
        actions: &ActionRegistry,
        player: EntityId,
        input: Option<&str>,
    ) -> EngineResult<TurnOutcome> {
        if world.entity(player).is_none() {
            return Err(EngineError::PlayerNotFound(player));
        }
        self.turn += 1;
        debug!(turn = self.turn, %player, input, "turn started");

        let mut outcome = TurnOutcome {
            turn: self.turn,
            ..TurnOutcome::default()
        };
        for system in &self.systems {
            if let Some(flag) = system.bypass_flag() {
                if world.entity(player).is_some_and(|p| has_flag(p, flag)) {
                    trace!(system = system.name(), ?flag, "system bypassed");
                    continue;
                }
            }
            let mut ctx = TurnContext::new(
                player,
                world,
                actions,
                &self.config,
                input,
                self.turn,
                system.name(),
                &mut self.markers,
                &mut outcome,
            );
            system.run(&mut ctx)?;
        }

        debug!(
            turn = self.turn,
            lines = outcome.lines.len(),
            quit = outcome.quit_requested,
            "turn finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::MarkerKind;

    #[derive(Debug)]
    struct Echo;

    impl System for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn run(&self, ctx: &mut TurnContext<'_>) -> EngineResult<()> {
            if let Some(line) = ctx.input() {
                ctx.output(line)?;
            }
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Skippable;

    impl System for Skippable {
        fn name(&self) -> &str {
            "skippable"
        }

        fn bypass_flag(&self) -> Option<crate::world::Flag> {
            Some(crate::world::Flag::BypassInventory)
        }

        fn run(&self, ctx: &mut TurnContext<'_>) -> EngineResult<()> {
            ctx.output("ran")
        }
    }

    fn world() -> (EntityManager, EntityId) {
        let mut world = EntityManager::new();
        let player = world.create_entity("players", "player");
        (world, player)
    }

    #[test]
    fn standard_order() {
        let pipeline = Pipeline::standard(GameConfig::default());
        assert_eq!(
            pipeline.system_names(),
            vec![
                "input",
                "motd",
                "command dispatch",
                "question response",
                "quit",
                "room movement",
                "description",
                "inventory",
                "unknown command",
                "output flush",
            ]
        );
    }

    #[test]
    fn systems_run_in_order_and_output_is_flushed() {
        let (mut world, player) = world();
        let actions = ActionRegistry::new();
        let mut pipeline = Pipeline::new(GameConfig::default())
            .with_system(Echo)
            .with_system(OutputFlushSystem);

        let outcome = pipeline
            .run_turn(&mut world, &actions, player, Some("hello"))
            .unwrap();
        assert_eq!(outcome.turn, 1);
        assert_eq!(outcome.texts(), vec!["hello"]);
        assert_eq!(pipeline.turn(), 1);
        assert_eq!(pipeline.markers().unconsumed(1, MarkerKind::Output), 0);
    }

    #[test]
    fn bypass_flag_skips_system() {
        let (mut world, player) = world();
        world.entity_mut(player).unwrap().add(
            "script",
            crate::world::Flags::new([crate::world::Flag::BypassInventory]),
        );
        let actions = ActionRegistry::new();
        let mut pipeline = Pipeline::new(GameConfig::default())
            .with_system(Skippable)
            .with_system(OutputFlushSystem);

        let outcome = pipeline.run_turn(&mut world, &actions, player, None).unwrap();
        assert!(outcome.lines.is_empty());
    }

    #[test]
    fn missing_player_is_an_error() {
        let (mut world, _) = world();
        let actions = ActionRegistry::new();
        let mut pipeline = Pipeline::standard(GameConfig::default());
        let result = pipeline.run_turn(&mut world, &actions, EntityId::from_raw(77), None);
        assert!(matches!(result, Err(EngineError::PlayerNotFound(_))));
        assert_eq!(pipeline.turn(), 0);
    }

    #[test]
    fn render_by_kind() {
        let render = |kind, text: &str| {
            OutputLine::render(&Output {
                text: text.into(),
                kind,
            })
            .text
        };
        assert_eq!(render(OutputKind::Regular, "plain"), "plain");
        assert_eq!(render(OutputKind::MessageOfTheDay, "Welcome"), "-[ Welcome ]-");
        assert_eq!(render(OutputKind::Command, "look"), "> look");
        assert_eq!(render(OutputKind::Separator, "ignored"), "");
    }

    #[test]
    fn texts_of_filters_by_kind() {
        let outcome = TurnOutcome {
            turn: 1,
            lines: vec![
                OutputLine {
                    kind: OutputKind::Command,
                    text: "> look".into(),
                },
                OutputLine {
                    kind: OutputKind::Regular,
                    text: "A field.".into(),
                },
            ],
            quit_requested: false,
        };
        assert_eq!(outcome.texts_of(OutputKind::Regular), vec!["A field."]);
        assert_eq!(outcome.texts().len(), 2);
    }
}
