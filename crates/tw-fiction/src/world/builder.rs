//! World construction and validation.

use tracing::debug;
use tw_core::{EntityId, EntityManager, GroupName};

use super::components::{
    CurrentRoom, Description, Dialog, Exit, Item, ItemDrop, MOTD, QuestionSequence,
    ShowDescription, Value,
};
use super::direction::Direction;
use super::inventory::{Inventory, ItemStack, drop_stack};
use super::query;
use crate::config::GameConfig;
use crate::error::{EngineError, EngineResult};
use crate::parser::CommandSet;

/// Assembles rooms, items, NPCs and players into an [`EntityManager`].
///
/// Mistakes such as an exit to a missing room are collected and reported by
/// [`build`](Self::build), so a finished world never fails lookups the
/// runtime relies on.
#[derive(Debug)]
pub struct WorldBuilder {
    world: EntityManager,
    config: GameConfig,
    problems: Vec<String>,
}

impl Default for WorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldBuilder {
    /// A builder using the default configuration for player stats.
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// A builder taking player stats from `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        let mut world = EntityManager::new();
        for group in [
            GroupName::Core,
            GroupName::Players,
            GroupName::Rooms,
            GroupName::Items,
            GroupName::Npcs,
        ] {
            world.create_group(group);
        }
        query::ensure_output_entity(&mut world);
        Self {
            world,
            config: config.clone(),
            problems: Vec::new(),
        }
    }

    /// Add a room.
    pub fn room(&mut self, name: &str, description: &str) -> EntityId {
        let id = self.world.create_entity(GroupName::Rooms, name);
        self.add_component(id, "description", Description::new(description));
        id
    }

    /// Add a visible one-way exit.
    pub fn exit(&mut self, from: EntityId, direction: Direction, to: EntityId) -> &mut Self {
        self.add_exit(from, direction, to, false)
    }

    /// Add an exit that can be taken but is not listed.
    pub fn hidden_exit(&mut self, from: EntityId, direction: Direction, to: EntityId) -> &mut Self {
        self.add_exit(from, direction, to, true)
    }

    /// Add an exit from `a` to `b` and the opposite exit back.
    pub fn two_way_exit(&mut self, a: EntityId, direction: Direction, b: EntityId) -> &mut Self {
        self.exit(a, direction, b);
        self.exit(b, direction.opposite(), a)
    }

    /// Give a room commands of its own, tried when the player's own set has
    /// no match.
    pub fn room_commands(&mut self, room: EntityId, commands: CommandSet) -> &mut Self {
        self.add_component(room, "command set", commands);
        self
    }

    /// Define an item.
    pub fn item(&mut self, item: Item) -> EntityId {
        let id = self.world.create_entity(GroupName::Items, item.name.clone());
        self.add_component(id, "description", Description::new(item.description.clone()));
        self.add_component(id, "item", item);
        id
    }

    /// Lay `quantity` of an item in a room.
    pub fn place_item(&mut self, room: EntityId, item: EntityId, quantity: u32) -> &mut Self {
        let Some(name) = query::item_definition(&self.world, item).map(|i| i.name.clone()) else {
            self.problems.push(format!("placed item {item} is not defined"));
            return self;
        };
        if let Err(e) = drop_stack(&mut self.world, room, ItemStack::new(item, name, quantity)) {
            self.problems.push(format!("cannot place item {item}: {e}"));
        }
        self
    }

    /// Add an NPC standing in `room`.
    pub fn npc(
        &mut self,
        name: &str,
        description: &str,
        room: EntityId,
        dialog: Option<Dialog>,
    ) -> EntityId {
        let id = self.world.create_entity(GroupName::Npcs, name);
        self.add_component(id, "description", Description::new(description));
        self.add_component(id, "current room", CurrentRoom { room });
        if let Some(dialog) = dialog {
            self.add_component(id, "dialog", dialog);
        }
        id
    }

    /// Add a player standing in `room`, with the built-in commands, an empty
    /// inventory, health and gold, and the opening room description queued.
    pub fn player(&mut self, name: &str, description: &str, room: EntityId) -> EntityId {
        let id = self.world.create_entity(GroupName::Players, name);
        let health = Value::new(self.config.starting_health, self.config.max_health);
        let gold = Value::new(self.config.starting_gold, self.config.max_gold);
        self.add_component(id, "description", Description::new(description));
        self.add_component(id, "command set", CommandSet::core());
        self.add_component(id, "inventory", Inventory::new());
        self.add_component(id, "health", health);
        self.add_component(id, "gold", gold);
        self.add_component(id, "current room", CurrentRoom { room });
        for marker in [
            ShowDescription::Room(room),
            ShowDescription::Npcs(room),
            ShowDescription::Exits(room),
        ] {
            self.add_component(id, "show description", marker);
        }
        id
    }

    /// Show `text` once, at the start of the player's first turn.
    pub fn motd(&mut self, player: EntityId, text: &str) -> &mut Self {
        self.add_component(player, MOTD, Description::new(text));
        self
    }

    /// Put a list of questions to the player.
    pub fn questions(&mut self, player: EntityId, questions: QuestionSequence) -> &mut Self {
        self.add_component(player, "question sequence", questions);
        self
    }

    /// Direct access for anything the builder has no method for.
    pub fn world_mut(&mut self) -> &mut EntityManager {
        &mut self.world
    }

    /// Validate and return the world.
    pub fn build(self) -> EngineResult<EntityManager> {
        if !self.problems.is_empty() {
            return Err(EngineError::InvalidWorld(self.problems.join("; ")));
        }
        validate_world(&self.world)?;
        Ok(self.world)
    }

    fn add_exit(&mut self, from: EntityId, direction: Direction, to: EntityId, hidden: bool) -> &mut Self {
        let room_name = self
            .world
            .get_entity_by_id(GroupName::Rooms, to)
            .map(|r| r.name().to_string())
            .unwrap_or_default();
        self.add_component(
            from,
            "exit",
            Exit {
                direction,
                room: to,
                room_name,
                hidden,
            },
        );
        self
    }

    fn add_component<T: tw_core::Component>(&mut self, id: EntityId, name: &str, value: T) {
        match self.world.entity_mut(id) {
            Some(entity) => {
                entity.add(name, value);
            }
            None => self.problems.push(format!("{name} added to missing entity {id}")),
        }
    }
}

/// Check that every reference in the world points at an entity of the right
/// group: exits and current rooms at rooms, drops and inventories at items.
pub fn validate_world(world: &EntityManager) -> EngineResult<()> {
    let invalid = |what: String, e: tw_core::CoreError| EngineError::InvalidWorld(format!("{what}: {e}"));

    for room in world.entities(GroupName::Rooms) {
        for exit in room.find_all::<Exit>() {
            world
                .require_entity(GroupName::Rooms, exit.room)
                .map_err(|e| invalid(format!("exit {} of {}", exit.direction, room.name()), e))?;
        }
        for item_drop in room.find_all::<ItemDrop>() {
            world
                .require_entity(GroupName::Items, item_drop.0.item)
                .map_err(|e| invalid(format!("item lying in {}", room.name()), e))?;
        }
    }

    for group in [GroupName::Players, GroupName::Npcs] {
        for entity in world.entities(group) {
            if let Some(current) = entity.find_first::<CurrentRoom>() {
                world
                    .require_entity(GroupName::Rooms, current.room)
                    .map_err(|e| invalid(format!("location of {}", entity.name()), e))?;
            }
            if let Some(inventory) = entity.find_first::<Inventory>() {
                for stack in inventory.items() {
                    world
                        .require_entity(GroupName::Items, stack.item)
                        .map_err(|e| invalid(format!("inventory of {}", entity.name()), e))?;
                }
            }
        }
    }

    debug!(
        rooms = world.entity_ids(GroupName::Rooms).len(),
        items = world.entity_ids(GroupName::Items).len(),
        npcs = world.entity_ids(GroupName::Npcs).len(),
        players = world.entity_ids(GroupName::Players).len(),
        "world validated"
    );
    Ok(())
}
