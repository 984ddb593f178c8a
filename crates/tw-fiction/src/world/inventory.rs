use tw_core::{EntityId, EntityManager};

use crate::error::{EngineError, EngineResult};
use crate::world::ItemDrop;

/// A quantity of one item, as held in an inventory or lying in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    /// The item definition entity.
    pub item: EntityId,
    /// Display name, copied from the item.
    pub name: String,
    /// How many.
    pub quantity: u32,
}

impl ItemStack {
    /// Create a stack.
    pub fn new(item: EntityId, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            item,
            name: name.into(),
            quantity,
        }
    }
}

/// Items carried by a player. Stacks are unique by item id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<ItemStack>,
}

impl Inventory {
    /// An empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stack, merging quantities with an existing stack of the same item.
    pub fn add(&mut self, stack: ItemStack) {
        match self.items.iter_mut().find(|s| s.item == stack.item) {
            Some(existing) => existing.quantity += stack.quantity,
            None => self.items.push(stack),
        }
    }

    /// Remove the whole stack of an item.
    pub fn remove(&mut self, item: EntityId) -> Option<ItemStack> {
        let index = self.items.iter().position(|s| s.item == item)?;
        Some(self.items.remove(index))
    }

    /// Take one unit of an item. The stack disappears when it reaches zero.
    /// Returns the remaining quantity, or `None` if the item is not held.
    pub fn decrement(&mut self, item: EntityId) -> Option<u32> {
        let index = self.items.iter().position(|s| s.item == item)?;
        let stack = &mut self.items[index];
        stack.quantity = stack.quantity.saturating_sub(1);
        let remaining = stack.quantity;
        if remaining == 0 {
            self.items.remove(index);
        }
        Some(remaining)
    }

    /// The stack for an item.
    pub fn get(&self, item: EntityId) -> Option<&ItemStack> {
        self.items.iter().find(|s| s.item == item)
    }

    /// The first stack whose name matches, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&ItemStack> {
        self.items.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Every stack, in the order first acquired.
    pub fn items(&self) -> &[ItemStack] {
        &self.items
    }

    /// Remove and return every stack.
    pub fn take_all(&mut self) -> Vec<ItemStack> {
        std::mem::take(&mut self.items)
    }

    /// Number of distinct stacks.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is carried.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// One `name: (quantity)` line per stack.
    pub fn summary(&self) -> String {
        self.items
            .iter()
            .map(|s| format!("{}: ({})", s.name, s.quantity))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Put a stack into an entity's inventory, creating the inventory if needed.
pub fn give_stack(world: &mut EntityManager, holder: EntityId, stack: ItemStack) -> EngineResult<()> {
    let entity = world
        .entity_mut(holder)
        .ok_or(EngineError::EntityNotFound(holder))?;
    match entity.first_mut::<Inventory>() {
        Some(inventory) => inventory.add(stack),
        None => {
            let mut inventory = Inventory::new();
            inventory.add(stack);
            entity.add("inventory", inventory);
        }
    }
    Ok(())
}

/// Lay a stack down in a room, merging with a drop of the same item.
pub fn drop_stack(world: &mut EntityManager, room: EntityId, stack: ItemStack) -> EngineResult<()> {
    let entity = world
        .entity_mut(room)
        .ok_or(EngineError::EntityNotFound(room))?;
    match entity.first_mut_where::<ItemDrop>(|d| d.0.item == stack.item) {
        Some(existing) => existing.0.quantity = existing.0.quantity.saturating_add(stack.quantity),
        None => {
            entity.add("item drop", ItemDrop(stack));
        }
    }
    Ok(())
}
