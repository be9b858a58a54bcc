//! Snapshot and restore errors.

use crate::action::ActionError;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::RegistryError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// No scene was ever recorded for the floor. Floors are only fabricated
    /// on the new-game and descend paths.
    #[error("no saved scene for floor {floor}")]
    MissingScene { floor: u32 },

    #[error("no template named '{0}'")]
    UnknownTemplate(String),

    #[error("unknown tile kind '{0}'")]
    UnknownTileKind(String),

    /// An item names a container that was not restored before it.
    #[error("container '{container}' of item '{item}' was not restored")]
    UnresolvedContainer { item: String, container: String },

    #[error("a restore is already running")]
    RestoreInProgress,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        use SnapshotError::*;
        match self {
            MissingScene { .. } => ErrorSeverity::Fatal,
            UnknownTemplate(_) | UnknownTileKind(_) => ErrorSeverity::Validation,
            UnresolvedContainer { .. } => ErrorSeverity::Internal,
            RestoreInProgress => ErrorSeverity::Recoverable,
            Registry(error) => error.severity(),
            Action(error) => error.severity(),
            Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use SnapshotError::*;
        match self {
            MissingScene { .. } => "SNAPSHOT_MISSING_SCENE",
            UnknownTemplate(_) => "SNAPSHOT_UNKNOWN_TEMPLATE",
            UnknownTileKind(_) => "SNAPSHOT_UNKNOWN_TILE_KIND",
            UnresolvedContainer { .. } => "SNAPSHOT_UNRESOLVED_CONTAINER",
            RestoreInProgress => "SNAPSHOT_RESTORE_IN_PROGRESS",
            Registry(error) => error.error_code(),
            Action(error) => error.error_code(),
            Oracle(error) => error.error_code(),
        }
    }
}
