//! Runtime errors.

use game_core::{GameError, OracleError, RegistryError, SnapshotError, TurnError};
use thiserror::Error;

use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no saved game")]
    NoSave,

    #[error("template '{0}' is not in the catalog")]
    MissingTemplate(String),

    #[error("generated floor {floor} has no rooms")]
    EmptyFloor { floor: u32 },

    #[error("there is no floor {0}")]
    InvalidFloor(i64),
}

impl RuntimeError {
    /// Whether play can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RuntimeError::Turn(error) => error.severity().is_recoverable(),
            RuntimeError::Snapshot(error) => error.severity().is_recoverable(),
            RuntimeError::NoSave | RuntimeError::InvalidFloor(_) => true,
            _ => false,
        }
    }

    /// Stable identifier of the underlying failure.
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeError::Turn(error) => error.error_code(),
            RuntimeError::Snapshot(error) => error.error_code(),
            RuntimeError::Registry(error) => error.error_code(),
            RuntimeError::Oracle(error) => error.error_code(),
            RuntimeError::Repository(_) => "RUNTIME_REPOSITORY",
            RuntimeError::NoSave => "RUNTIME_NO_SAVE",
            RuntimeError::MissingTemplate(_) => "RUNTIME_MISSING_TEMPLATE",
            RuntimeError::EmptyFloor { .. } => "RUNTIME_EMPTY_FLOOR",
            RuntimeError::InvalidFloor(_) => "RUNTIME_INVALID_FLOOR",
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
