//! Game components, world queries, and world construction.

mod builder;
mod components;
mod direction;
mod inventory;
pub mod query;

pub use builder::{WorldBuilder, validate_world};
pub use components::{
    CommandAction, CommandInput, ComponentsOnHold, CurrentRoom, DEFAULT_ITEM_ACTION, Description,
    Dialog, DialogResponse, Exit, Flag, Flags, Item, ItemDrop, MOTD, Output, OutputKind,
    QuestionSequence, Quit, ShowDescription, Value, adjust_value, end_engagement, engaged_npc,
    has_flag, hold_components, release_components,
};
pub use direction::Direction;
pub use inventory::{Inventory, ItemStack, drop_stack, give_stack};
