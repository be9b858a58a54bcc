//! Session runtime for the dungeon crawler.
//!
//! Wires `game-core` to concrete collaborators: a field of view, a
//! pathfinder, a dungeon generator, the template catalog from `game-content`
//! and a persisted save store. [`Session`] is the single entry point hosts
//! drive.

pub mod config;
pub mod error;
pub mod oracle;
pub mod repository;
mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use oracle::{BfsPathfinder, BoundedLog, LineOfSightFov, RoomsAndCorridors};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository,
};
pub use session::Session;
