use crate::state::{Entity, Position};

/// Prefab lookup keyed by the name stored in entity records.
pub trait TemplateRegistry {
    /// Builds a fresh, unregistered entity from the named template.
    /// Returns `None` for unknown names.
    fn instantiate(&self, name: &str, position: Position) -> Option<Entity>;

    fn contains(&self, name: &str) -> bool;
}
