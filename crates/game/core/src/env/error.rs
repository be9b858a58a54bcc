//! Collaborator access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when a required collaborator is missing or cannot
/// answer a request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("field of view collaborator not available")]
    FovNotAvailable,

    #[error("pathfinding collaborator not available")]
    PathsNotAvailable,

    #[error("template registry not available")]
    TemplatesNotAvailable,

    #[error("rng oracle not available")]
    RngNotAvailable,

    /// No template is registered under the name.
    #[error("template '{0}' not found")]
    TemplateNotFound(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            // Missing collaborators are fatal; the engine cannot proceed
            FovNotAvailable | PathsNotAvailable | TemplatesNotAvailable | RngNotAvailable => {
                ErrorSeverity::Fatal
            }
            TemplateNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            FovNotAvailable => "ORACLE_FOV_NOT_AVAILABLE",
            PathsNotAvailable => "ORACLE_PATHS_NOT_AVAILABLE",
            TemplatesNotAvailable => "ORACLE_TEMPLATES_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            TemplateNotFound(_) => "ORACLE_TEMPLATE_NOT_FOUND",
        }
    }
}
