//! Repository layer for the persisted save tree.
//!
//! The whole [`SaveTree`](game_core::SaveTree) is one blob: every write
//! replaces it, every read returns all floors at once.

mod error;
pub mod file;
pub mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
