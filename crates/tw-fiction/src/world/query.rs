//! Read-only lookups over the entity manager shared by actions and systems.
//!
//! Absence is always `None` or an empty list here; callers turn it into a
//! message for the player.

use tw_core::{ComponentId, Entity, EntityId, EntityManager, GroupName};

use super::{CurrentRoom, Description, Exit, Inventory, Item, ItemDrop, ItemStack, MOTD};
use crate::world::Direction;

/// Name of the engine entity in the core group that collects output.
pub const OUTPUT_ENTITY: &str = "output";

/// The shared output entity, if it exists.
pub fn output_entity(world: &EntityManager) -> Option<EntityId> {
    world
        .get_entity_by_name(GroupName::Core, OUTPUT_ENTITY)
        .map(Entity::id)
}

/// The shared output entity, created on first use.
pub fn ensure_output_entity(world: &mut EntityManager) -> EntityId {
    match output_entity(world) {
        Some(id) => id,
        None => world.create_entity(GroupName::Core, OUTPUT_ENTITY),
    }
}

/// The room an entity is in.
pub fn current_room(world: &EntityManager, entity: EntityId) -> Option<EntityId> {
    world
        .entity(entity)?
        .find_first::<CurrentRoom>()
        .map(|c| c.room)
}

/// An entity's own description, ignoring any message of the day.
pub fn describe(entity: &Entity) -> Option<&str> {
    entity
        .find_all::<Description>()
        .into_iter()
        .find(|d| d.name != MOTD)
        .map(|d| d.value.text.as_str())
}

/// NPCs whose current room is `room`, in group order.
pub fn npcs_in_room(world: &EntityManager, room: EntityId) -> Vec<&Entity> {
    world.find_entities(GroupName::Npcs, |npc| {
        npc.find_first::<CurrentRoom>().is_some_and(|c| c.room == room)
    })
}

/// Every exit of a room, hidden ones included.
pub fn exits(world: &EntityManager, room: EntityId) -> Vec<Exit> {
    world
        .get_entity_by_id(GroupName::Rooms, room)
        .map(|r| r.find_all::<Exit>().iter().map(|e| e.value.clone()).collect())
        .unwrap_or_default()
}

/// The exit of `room` leading in `direction`.
pub fn exit_towards(world: &EntityManager, room: EntityId, direction: Direction) -> Option<Exit> {
    exits(world, room)
        .into_iter()
        .find(|e| e.direction == direction)
}

/// The exit listing shown to the player.
pub fn exits_summary(world: &EntityManager, room: EntityId) -> String {
    let visible: Vec<String> = exits(world, room)
        .iter()
        .filter(|e| !e.hidden)
        .map(|e| format!("{} : {}", e.direction.title(), e.room_name))
        .collect();
    if visible.is_empty() {
        "No exits".to_string()
    } else {
        format!("Exits: [{}]", visible.join(", "))
    }
}

/// The item definition for an item entity.
pub fn item_definition(world: &EntityManager, item: EntityId) -> Option<&Item> {
    world
        .get_entity_by_id(GroupName::Items, item)?
        .find_first::<Item>()
        .map(|i| i.value)
}

/// Whether `name` refers to the item in `stack`.
pub fn stack_answers_to(world: &EntityManager, stack: &ItemStack, name: &str) -> bool {
    match item_definition(world, stack.item) {
        Some(item) => item.answers_to(name),
        None => stack.name.eq_ignore_ascii_case(name),
    }
}

/// Every item stack lying in a room.
pub fn room_drops(world: &EntityManager, room: EntityId) -> Vec<ItemStack> {
    world
        .entity(room)
        .map(|r| r.find_all::<ItemDrop>().iter().map(|d| d.value.0.clone()).collect())
        .unwrap_or_default()
}

/// The drop in `room` that `name` refers to, with its component id.
pub fn find_room_drop(
    world: &EntityManager,
    room: EntityId,
    name: &str,
) -> Option<(ComponentId, ItemStack)> {
    world
        .entity(room)?
        .find_all::<ItemDrop>()
        .into_iter()
        .find(|d| stack_answers_to(world, &d.value.0, name))
        .map(|d| (d.id, d.value.0.clone()))
}

/// The stack in an entity's inventory that `name` refers to.
pub fn find_inventory_stack(
    world: &EntityManager,
    holder: EntityId,
    name: &str,
) -> Option<ItemStack> {
    world
        .entity(holder)?
        .find_first::<Inventory>()?
        .value
        .items()
        .iter()
        .find(|s| stack_answers_to(world, s, name))
        .cloned()
}
