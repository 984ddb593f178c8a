//! The systems run each turn, in the order [`Pipeline::standard`] lists them.
//!
//! [`Pipeline::standard`]: crate::pipeline::Pipeline::standard

mod command;
mod description;
mod input;
mod inventory;
mod motd;
mod movement;
mod output;
mod question;
mod quit;
mod unknown;

pub use command::CommandDispatchSystem;
pub use description::DescriptionSystem;
pub use input::InputSystem;
pub use inventory::InventorySystem;
pub use motd::MotdSystem;
pub use movement::RoomMovementSystem;
pub use output::OutputFlushSystem;
pub use question::QuestionResponseSystem;
pub use quit::QuitSystem;
pub use unknown::UnknownCommandSystem;
