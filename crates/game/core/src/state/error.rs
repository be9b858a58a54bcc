//! World registry errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Errors raised while adding, removing or allocating world entities.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The entity is not owned by the registry.
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    /// Index 0 of the entity and actor lists belongs to the player.
    #[error("index 0 is reserved for the player (entity {entity})")]
    ReservedIndex { entity: EntityId },

    #[error("insert index {index} out of range (len: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A second player actor was spawned while one is present.
    #[error("a player entity already exists")]
    DuplicatePlayer,

    #[error("the player entity cannot be destroyed")]
    PlayerNotRemovable,

    #[error("entity id space exhausted")]
    EntityIdOverflow,
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        use RegistryError::*;
        match self {
            ReservedIndex { .. } | IndexOutOfRange { .. } | DuplicatePlayer => {
                ErrorSeverity::Validation
            }
            PlayerNotRemovable => ErrorSeverity::Recoverable,
            UnknownEntity(_) => ErrorSeverity::Internal,
            EntityIdOverflow => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use RegistryError::*;
        match self {
            UnknownEntity(_) => "REGISTRY_UNKNOWN_ENTITY",
            ReservedIndex { .. } => "REGISTRY_RESERVED_INDEX",
            IndexOutOfRange { .. } => "REGISTRY_INDEX_OUT_OF_RANGE",
            DuplicatePlayer => "REGISTRY_DUPLICATE_PLAYER",
            PlayerNotRemovable => "REGISTRY_PLAYER_NOT_REMOVABLE",
            EntityIdOverflow => "REGISTRY_ENTITY_ID_OVERFLOW",
        }
    }
}
