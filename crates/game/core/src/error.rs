//! Error classification shared by every game-core error type.
//!
//! `RegistryError`, `ActionError`, `TurnError`, `OracleError` and
//! `SnapshotError` live next to the code that raises them.

/// How a caller should treat a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request was refused or the turn wasted; play goes on.
    /// Destination blocked, target already confused.
    Recoverable,

    /// Malformed request. Unknown entity, reserved registry index.
    Validation,

    /// The world disagrees with itself. An item names a container that was
    /// never restored.
    Internal,

    /// Save data is missing or unusable.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and assertions.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
