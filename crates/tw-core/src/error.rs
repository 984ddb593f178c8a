use crate::entity::EntityId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while constructing or validating a world.
///
/// Lookups during play return `Option` instead; a missing room or item is a
/// normal game condition there, not a fault.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested group has never been created.
    #[error("group not found: \"{0}\"")]
    GroupNotFound(String),

    /// The entity is not a member of the given group.
    #[error("entity {id} not found in group \"{group}\"")]
    EntityNotFound {
        /// The group that was searched.
        group: String,
        /// The missing entity.
        id: EntityId,
    },

    /// A required component is absent from an entity.
    #[error("entity {id} is missing a required {component} component")]
    MissingComponent {
        /// The entity that was inspected.
        id: EntityId,
        /// Type name of the missing component.
        component: &'static str,
    },

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
