//! Showing, taking, dropping and using items.

use crate::error::EngineResult;
use crate::pipeline::TurnContext;
use crate::world::{Inventory, Item, ItemDrop, ItemStack, drop_stack, give_stack, query};

const NOT_HERE: &str = "That item does not exist here";
const NOT_CARRIED: &str = "That item is not in your inventory";
const NOTHING_TO_DROP: &str = "You have no items to drop";
const NOT_HELD: &str = "You don't have that item";

/// The lowercased words after the matched phrase, naming an item or NPC.
pub(super) fn argument(ctx: &TurnContext<'_>) -> String {
    ctx.command().map(|c| c.remainder()).unwrap_or_default()
}

fn describe_stack(ctx: &TurnContext<'_>, stack: &ItemStack) -> String {
    let description = query::item_definition(ctx.world, stack.item)
        .map(|i| i.description.as_str())
        .unwrap_or_default();
    format!("{} ({}) : {}", stack.name, stack.quantity, description)
}

pub(super) fn show(ctx: &mut TurnContext<'_>) -> EngineResult<()> {
    let name = argument(ctx);
    let found = ctx
        .current_room()
        .and_then(|room| query::find_room_drop(ctx.world, room, &name));
    let text = match found {
        Some((_, stack)) => describe_stack(ctx, &stack),
        None => NOT_HERE.to_string(),
    };
    ctx.output(text)
}

pub(super) fn show_all(ctx: &mut TurnContext<'_>) -> EngineResult<()> {
    let drops = ctx
        .current_room()
        .map(|room| query::room_drops(ctx.world, room))
        .unwrap_or_default();
    if drops.is_empty() {
        return ctx.output("There are no items here");
    }
    let lines: Vec<String> = drops.iter().map(|s| describe_stack(&*ctx, s)).collect();
    ctx.output(format!("The following items are here:\n{}", lines.join("\n")))
}

pub(super) fn take(ctx: &mut TurnContext<'_>) -> EngineResult<()> {
    let name = argument(ctx);
    let player = ctx.player;
    let Some(room) = ctx.current_room() else {
        return ctx.output(NOT_HERE);
    };
    let Some((drop_id, stack)) = query::find_room_drop(ctx.world, room, &name) else {
        return ctx.output(NOT_HERE);
    };
    if let Some(entity) = ctx.world.entity_mut(room) {
        entity.remove(drop_id);
    }
    let text = format!("You've taken {}", stack.name);
    give_stack(ctx.world, player, stack)?;
    ctx.output(text)
}

pub(super) fn take_all(ctx: &mut TurnContext<'_>) -> EngineResult<()> {
    let player = ctx.player;
    let drops = match ctx.current_room() {
        Some(room) => ctx
            .world
            .entity_mut(room)
            .map(|r| r.drain::<ItemDrop>())
            .unwrap_or_default(),
        None => Vec::new(),
    };
    if drops.is_empty() {
        return ctx.output("No items exist here");
    }
    let mut lines = Vec::with_capacity(drops.len());
    for ItemDrop(stack) in drops {
        lines.push(format!("{} ({})", stack.name, stack.quantity));
        give_stack(ctx.world, player, stack)?;
    }
    ctx.output(format!("You've taken the following items:\n{}", lines.join("\n")))
}

pub(super) fn drop(ctx: &mut TurnContext<'_>) -> EngineResult<()> {
    let name = argument(ctx);
    let player = ctx.player;
    let room = ctx.current_room();
    let stack = query::find_inventory_stack(ctx.world, player, &name);
    let (Some(room), Some(stack)) = (room, stack) else {
        return ctx.output(NOT_CARRIED);
    };
    if let Some(inventory) = ctx.player_entity_mut()?.first_mut::<Inventory>() {
        inventory.remove(stack.item);
    }
    let text = format!("You've dropped {}", stack.name);
    drop_stack(ctx.world, room, stack)?;
    ctx.output(text)
}

pub(super) fn drop_all(ctx: &mut TurnContext<'_>) -> EngineResult<()> {
    let Some(room) = ctx.current_room() else {
        return ctx.output(NOTHING_TO_DROP);
    };
    let stacks = ctx
        .player_entity_mut()?
        .first_mut::<Inventory>()
        .map(Inventory::take_all)
        .unwrap_or_default();
    if stacks.is_empty() {
        return ctx.output(NOTHING_TO_DROP);
    }
    for stack in stacks {
        drop_stack(ctx.world, room, stack)?;
    }
    ctx.output("You've dropped all items")
}

pub(super) fn use_item(ctx: &mut TurnContext<'_>) -> EngineResult<()> {
    let name = argument(ctx);
    let player = ctx.player;
    let Some(stack) = query::find_inventory_stack(ctx.world, player, &name) else {
        return ctx.output(NOT_HELD);
    };
    let item: Option<Item> = query::item_definition(ctx.world, stack.item).cloned();

    ctx.output(format!("You've used {}", stack.name))?;
    match item.as_ref().and_then(Item::default_action) {
        Some(action) => ctx.invoke(action)?,
        None => ctx.output("Hmm, nothing happened...")?,
    }

    if item.is_some_and(|i| i.consumable) {
        if let Some(inventory) = ctx.player_entity_mut()?.first_mut::<Inventory>() {
            inventory.decrement(stack.item);
        }
    }
    Ok(())
}
