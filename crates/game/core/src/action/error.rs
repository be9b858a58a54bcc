//! Action execution errors.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, RegistryError};

/// Reasons an action was refused.
///
/// Recoverable variants have player-facing messages; the engine posts them to
/// the message log when a player action fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("entity {0} is not in the world")]
    ActorNotFound(EntityId),

    #[error("entity {actor} has no {capability}")]
    MissingCapability {
        actor: EntityId,
        capability: &'static str,
    },

    #[error("Your inventory is full.")]
    InventoryFull,

    #[error("There is nothing here to pick up.")]
    NothingToPickUp,

    #[error("item {item} is not carried by {actor}")]
    ItemNotCarried { actor: EntityId, item: EntityId },

    #[error("item {0} cannot be equipped")]
    NotEquippable(EntityId),

    #[error("item {0} cannot be used")]
    NotUsable(EntityId),

    #[error("no consumable is selected")]
    NoSelection,

    #[error("You must select a valid target.")]
    InvalidTarget(EntityId),

    #[error("There are no targets in the radius.")]
    NoTargetsInRadius,

    #[error("The target is already confused.")]
    AlreadyConfused(EntityId),

    #[error("You have no level points to spend.")]
    NoLevelPoints,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            InventoryFull | NothingToPickUp | InvalidTarget(_) | NoTargetsInRadius
            | AlreadyConfused(_) | NoLevelPoints => ErrorSeverity::Recoverable,
            ActorNotFound(_)
            | MissingCapability { .. }
            | ItemNotCarried { .. }
            | NotEquippable(_)
            | NotUsable(_)
            | NoSelection => ErrorSeverity::Validation,
            Registry(error) => error.severity(),
            Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            MissingCapability { .. } => "ACTION_MISSING_CAPABILITY",
            InventoryFull => "ACTION_INVENTORY_FULL",
            NothingToPickUp => "ACTION_NOTHING_TO_PICK_UP",
            ItemNotCarried { .. } => "ACTION_ITEM_NOT_CARRIED",
            NotEquippable(_) => "ACTION_NOT_EQUIPPABLE",
            NotUsable(_) => "ACTION_NOT_USABLE",
            NoSelection => "ACTION_NO_SELECTION",
            InvalidTarget(_) => "ACTION_INVALID_TARGET",
            NoTargetsInRadius => "ACTION_NO_TARGETS_IN_RADIUS",
            AlreadyConfused(_) => "ACTION_ALREADY_CONFUSED",
            NoLevelPoints => "ACTION_NO_LEVEL_POINTS",
            Registry(error) => error.error_code(),
            Oracle(error) => error.error_code(),
        }
    }
}
