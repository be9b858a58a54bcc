//! Item storage for actors.
//!
//! The inventory only tracks handles; moving an item between the floor and a
//! container also touches the registry and lives in `action::item`.

use crate::state::EntityId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    pub capacity: usize,
    pub items: Vec<EntityId>,
    /// Consumable waiting for a target while the owner is in targeting mode.
    pub selected: Option<EntityId>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
            selected: None,
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn contains(&self, item: EntityId) -> bool {
        self.items.contains(&item)
    }

    /// Appends an item. Returns false when the inventory is full or already
    /// holds the item.
    pub fn insert(&mut self, item: EntityId) -> bool {
        if self.is_full() || self.contains(item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Removes an item, clearing the selection if it pointed at it.
    pub fn remove(&mut self, item: EntityId) -> bool {
        let Some(index) = self.items.iter().position(|held| *held == item) else {
            return false;
        };

        self.items.remove(index);
        if self.selected == Some(item) {
            self.selected = None;
        }
        true
    }
}
