//! Collaborator traits consumed by the core.
//!
//! Field of view, pathfinding, dungeon generation, entity templates, messaging
//! and randomness are provided from outside. The [`GameEnv`] aggregate bundles
//! the read-only ones so the engine and the snapshot restorer can reach them
//! without hard coupling to concrete implementations. The message log is
//! mutable and travels separately.
mod error;
mod generator;
mod messages;
mod rng;
mod templates;
mod vision;

pub use error::OracleError;
pub use generator::{DungeonGenerator, GeneratedFloor, GenerationParams};
pub use messages::{Message, MessageLog, MessageTone, NullLog};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use templates::TemplateRegistry;
pub use vision::{FieldOfView, Pathfinder};

use crate::config::GameConfig;

/// Aggregates the read-only collaborators required by turns and restores.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    fov: Option<&'a dyn FieldOfView>,
    paths: Option<&'a dyn Pathfinder>,
    templates: Option<&'a dyn TemplateRegistry>,
    rng: Option<&'a dyn RngOracle>,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self {
            fov: None,
            paths: None,
            templates: None,
            rng: None,
            config,
        }
    }

    pub fn with_all(
        config: &'a GameConfig,
        fov: &'a dyn FieldOfView,
        paths: &'a dyn Pathfinder,
        templates: &'a dyn TemplateRegistry,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            fov: Some(fov),
            paths: Some(paths),
            templates: Some(templates),
            rng: Some(rng),
            config,
        }
    }

    pub fn with_fov(mut self, fov: &'a dyn FieldOfView) -> Self {
        self.fov = Some(fov);
        self
    }

    pub fn with_paths(mut self, paths: &'a dyn Pathfinder) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_templates(mut self, templates: &'a dyn TemplateRegistry) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn with_rng(mut self, rng: &'a dyn RngOracle) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Returns the field-of-view collaborator, or an error if not available.
    pub fn fov(&self) -> Result<&'a dyn FieldOfView, OracleError> {
        self.fov.ok_or(OracleError::FovNotAvailable)
    }

    pub fn paths(&self) -> Result<&'a dyn Pathfinder, OracleError> {
        self.paths.ok_or(OracleError::PathsNotAvailable)
    }

    pub fn templates(&self) -> Result<&'a dyn TemplateRegistry, OracleError> {
        self.templates.ok_or(OracleError::TemplatesNotAvailable)
    }

    pub fn rng(&self) -> Result<&'a dyn RngOracle, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("fov", &self.fov.is_some())
            .field("paths", &self.paths.is_some())
            .field("templates", &self.templates.is_some())
            .field("rng", &self.rng.is_some())
            .field("config", self.config)
            .finish()
    }
}
