//! Shared fixture for unit tests: a two-room world with items, an NPC and a
//! player, plus helpers to run one action or one system in isolation.

use tw_core::{EntityId, EntityManager};

use crate::action::ActionRegistry;
use crate::config::GameConfig;
use crate::parser::{CommandSet, tokenize};
use crate::pipeline::{MarkerLog, System, TurnContext, TurnOutcome};
use crate::world::{
    CommandAction, CommandInput, CurrentRoom, Dialog, Direction, Item, ItemStack, Output,
    ShowDescription, Value, WorldBuilder, adjust_value, give_stack, query,
};

pub(crate) struct Fixture {
    pub world: EntityManager,
    pub actions: ActionRegistry,
    pub config: GameConfig,
    pub markers: MarkerLog,
    pub outcome: TurnOutcome,
    pub player: EntityId,
    pub room: EntityId,
    pub stream: EntityId,
    pub npc: EntityId,
    pub potion: EntityId,
}

impl Fixture {
    pub fn new() -> Self {
        let mut builder = WorldBuilder::new();
        let room = builder.room("Open Field", "You are standing in an open field.");
        let stream = builder.room("Stream", "A cool stream runs past.");
        builder.two_way_exit(room, Direction::East, stream);
        let lamp = builder.item(Item::new("Lamp", "A brass lamp."));
        let potion = builder.item(
            Item::new("Health Potion", "Smells of mint.")
                .with_synonym("potion")
                .consumable()
                .on_use("test.heal"),
        );
        builder.place_item(room, lamp, 1).place_item(room, potion, 2);
        let npc = builder.npc(
            "Old Man",
            "A weathered old man.",
            room,
            Some(
                Dialog::new()
                    .with_response("hello", "Hi there!")
                    .with_action("quest", "Take this.", "test.reward"),
            ),
        );
        let player = builder.player("player", "A curious traveller.", room);
        let mut world = builder.build().unwrap();
        world.entity_mut(player).unwrap().drain::<ShowDescription>();

        let mut actions = ActionRegistry::with_core_actions();
        actions.register("test.heal", |ctx| {
            adjust_value(ctx.player_entity_mut()?, "health", 25);
            ctx.output("You feel better")
        });
        actions.register("test.reward", |ctx| {
            adjust_value(ctx.player_entity_mut()?, "gold", 100);
            ctx.output("You received 100 gold")
        });

        Self {
            world,
            actions,
            config: GameConfig::default(),
            markers: MarkerLog::new(0),
            outcome: TurnOutcome::default(),
            player,
            room,
            stream,
            npc,
            potion,
        }
    }

    pub fn context<'s>(&'s mut self, input: Option<&'s str>) -> TurnContext<'s> {
        TurnContext::new(
            self.player,
            &mut self.world,
            &self.actions,
            &self.config,
            input,
            1,
            "fixture",
            &mut self.markers,
            &mut self.outcome,
        )
    }

    /// Run one action as if `line` had resolved to it, returning the queued output.
    pub fn run(&mut self, action: &str, line: &str) -> Vec<Output> {
        let tokens = tokenize(line);
        let phrase = CommandSet::core()
            .resolve(&tokens)
            .map(|r| r.phrase)
            .unwrap_or_default();
        let player = self.player;
        {
            let mut ctx = self.context(Some(line));
            let id = ctx
                .push_marker(
                    player,
                    CommandAction {
                        tokens,
                        phrase,
                        action: action.into(),
                    },
                )
                .unwrap();
            ctx.invoke(&action.into()).unwrap();
            ctx.take_marker::<CommandAction>(player, id);
        }
        self.drain_output()
    }

    /// Run one system, returning the queued output.
    pub fn run_system(&mut self, system: &dyn System, input: Option<&str>) -> Vec<Output> {
        self.outcome = TurnOutcome::default();
        {
            let mut ctx = self.context(input);
            system.run(&mut ctx).unwrap();
        }
        self.drain_output()
    }

    pub fn push_input(&mut self, line: &str) {
        self.world
            .entity_mut(self.player)
            .unwrap()
            .add("command input", CommandInput { tokens: tokenize(line) });
    }

    pub fn pending_inputs(&self) -> usize {
        self.world.entity(self.player).unwrap().count::<CommandInput>()
    }

    pub fn drain_output(&mut self) -> Vec<Output> {
        match query::output_entity(&self.world) {
            Some(out) => self.world.entity_mut(out).unwrap().drain::<Output>(),
            None => Vec::new(),
        }
    }

    pub fn give_potions(&mut self, quantity: u32) {
        give_stack(
            &mut self.world,
            self.player,
            ItemStack::new(self.potion, "Health Potion", quantity),
        )
        .unwrap();
    }

    pub fn current_room(&self) -> Option<EntityId> {
        query::current_room(&self.world, self.player)
    }

    pub fn leave_room(&mut self) {
        self.world
            .entity_mut(self.player)
            .unwrap()
            .drain::<CurrentRoom>();
    }

    pub fn health(&self) -> i64 {
        self.stat("health")
    }

    pub fn gold(&self) -> i64 {
        self.stat("gold")
    }

    fn stat(&self, name: &str) -> i64 {
        self.world
            .entity(self.player)
            .unwrap()
            .find_first_by_name::<Value>(name)
            .unwrap()
            .current
    }
}

pub(crate) fn outputs(out: &[Output]) -> Vec<&str> {
    out.iter().map(|o| o.text.as_str()).collect()
}
