//! Core types for Textworld: entities, components, and the entity manager.
//!
//! This crate is a small, game-agnostic store. An [`Entity`] is a named bag of
//! typed components, and an [`EntityManager`] partitions entities into named
//! groups. Nothing here knows about rooms, items or commands; those payloads
//! live in `tw-fiction` and are stored here by type.

/// Component identity and typed lookup handles.
pub mod component;
/// Entity identifiers and the per-entity component tables.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Named entity groups and the manager that owns them.
pub mod manager;

/// Re-export component types.
pub use component::{Component, ComponentId, ComponentRef, DetachedComponent};
/// Re-export entity types.
pub use entity::{Entity, EntityId};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export manager types.
pub use manager::{EntityGroup, EntityManager, GroupName};
