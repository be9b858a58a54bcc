//! Repository contract for the save tree.

use game_core::SaveTree;

use super::Result;

/// Single-slot store for the save tree.
pub trait SaveRepository: Send + Sync {
    /// Replaces the stored tree.
    fn save(&self, tree: &SaveTree) -> Result<()>;

    /// Reads the stored tree, `None` when nothing was saved.
    fn load(&self) -> Result<Option<SaveTree>>;

    fn exists(&self) -> bool;

    /// Removes the stored tree. Deleting a missing save is not an error.
    fn delete(&self) -> Result<()>;
}
