//! Actor-related state types.
//!
//! Optional capabilities (combat, progression, inventory, equipment, AI) are
//! plain optional fields on [`ActorData`] and are checked directly.
//! - Fighter: hit points and base combat numbers
//! - Level: experience and level-up points
//! - Inventory: carried item handles and the selected consumable
//! - Equipment: weapon and armor slots

pub mod equipment;
pub mod fighter;
pub mod inventory;
pub mod level;

use std::collections::BTreeSet;

pub use equipment::Equipment;
pub use fighter::{Fighter, FighterState};
pub use inventory::Inventory;
pub use level::{Level, LevelCurve, LevelState};

use super::Position;
use crate::ai::AiPolicy;

/// Who decides what an actor does on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorRole {
    /// Driven by external input; always first in the registry lists.
    Player,
    /// Driven by its AI policy, or waits when it has none.
    Npc,
}

/// Target selection pending on the player after activating a targeted consumable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Targeting {
    Single,
    Area { radius: i32 },
}

/// Actor payload of an entity.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorData {
    pub role: ActorRole,
    pub alive: bool,
    pub fighter: Option<Fighter>,
    pub level: Option<Level>,
    pub inventory: Option<Inventory>,
    pub equipment: Option<Equipment>,
    pub ai: Option<AiPolicy>,

    /// Sight radius passed to the field-of-view collaborator.
    pub fov_range: u32,
    /// Cells seen from the current position; recomputed after every move.
    pub field_of_view: BTreeSet<Position>,
    pub targeting: Option<Targeting>,
}

impl ActorData {
    pub fn new(role: ActorRole, fov_range: u32) -> Self {
        Self {
            role,
            alive: true,
            fighter: None,
            level: None,
            inventory: None,
            equipment: None,
            ai: None,
            fov_range,
            field_of_view: BTreeSet::new(),
            targeting: None,
        }
    }

    pub fn with_fighter(mut self, state: FighterState) -> Self {
        self.fighter = Some(Fighter::new(state));
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_inventory(mut self, capacity: usize) -> Self {
        self.inventory = Some(Inventory::new(capacity));
        self
    }

    pub fn with_equipment(mut self) -> Self {
        self.equipment = Some(Equipment::default());
        self
    }

    pub fn with_ai(mut self, ai: AiPolicy) -> Self {
        self.ai = Some(ai);
        self
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.role == ActorRole::Player
    }

    pub fn can_see(&self, position: Position) -> bool {
        self.field_of_view.contains(&position)
    }
}
