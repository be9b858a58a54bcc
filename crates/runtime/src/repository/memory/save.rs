use std::sync::RwLock;

use game_core::SaveTree;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// In-memory implementation of SaveRepository.
#[derive(Default)]
pub struct InMemorySaveRepository {
    tree: RwLock<Option<SaveTree>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, tree: &SaveTree) -> Result<()> {
        let mut slot = self.tree.write().map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(tree.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveTree>> {
        let slot = self.tree.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn exists(&self) -> bool {
        self.tree
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn delete(&self) -> Result<()> {
        let mut slot = self.tree.write().map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}
