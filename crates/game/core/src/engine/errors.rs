use crate::action::ActionError;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Errors that can occur during turn operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("no actors in the turn rotation")]
    NoActors,

    #[error("a floor restore is in progress")]
    RestoreInProgress,

    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("action actor {actor} is not the player")]
    NotPlayerAction { actor: EntityId },

    #[error("the player is dead")]
    PlayerDead,

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        use TurnError::*;
        match self {
            RestoreInProgress | NotPlayerTurn | PlayerDead => ErrorSeverity::Recoverable,
            NotPlayerAction { .. } => ErrorSeverity::Validation,
            NoActors => ErrorSeverity::Internal,
            Action(error) => error.severity(),
            Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use TurnError::*;
        match self {
            NoActors => "TURN_NO_ACTORS",
            RestoreInProgress => "TURN_RESTORE_IN_PROGRESS",
            NotPlayerTurn => "TURN_NOT_PLAYER_TURN",
            NotPlayerAction { .. } => "TURN_NOT_PLAYER_ACTION",
            PlayerDead => "TURN_PLAYER_DEAD",
            Action(error) => error.error_code(),
            Oracle(error) => error.error_code(),
        }
    }
}
