//! Item-related state types.
//!
//! An item is an [`Entity`](super::Entity) whose kind carries [`ItemData`]:
//! an optional consumable effect, an optional equippable profile, and the
//! container currently holding it (`None` while it lies on the floor).

use strum::{Display, EnumString};

use super::EntityId;

/// Equipment slot an equippable item occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

/// Stat bonuses granted while an item is equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equippable {
    pub slot: EquipmentSlot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub power_bonus: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense_bonus: i32,
}

impl Equippable {
    pub fn weapon(power_bonus: i32) -> Self {
        Self {
            slot: EquipmentSlot::Weapon,
            power_bonus,
            defense_bonus: 0,
        }
    }

    pub fn armor(defense_bonus: i32) -> Self {
        Self {
            slot: EquipmentSlot::Armor,
            power_bonus: 0,
            defense_bonus,
        }
    }
}

/// Single-use effects. Targeted variants require a target selection step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Consumable {
    Healing { amount: i32 },
    Lightning { damage: i32, range: i32 },
    Fireball { damage: i32, radius: i32 },
    Confusion { turns: i32 },
}

impl Consumable {
    /// Whether activation enters targeting mode instead of applying immediately.
    pub fn needs_target(&self) -> bool {
        !matches!(self, Self::Healing { .. })
    }
}

/// Item payload of an entity.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ItemData {
    pub consumable: Option<Consumable>,
    pub equippable: Option<Equippable>,
    /// Entity whose inventory holds this item.
    pub container: Option<EntityId>,
}

impl ItemData {
    pub fn consumable(consumable: Consumable) -> Self {
        Self {
            consumable: Some(consumable),
            ..Self::default()
        }
    }

    pub fn equippable(equippable: Equippable) -> Self {
        Self {
            equippable: Some(equippable),
            ..Self::default()
        }
    }

    pub fn is_carried(&self) -> bool {
        self.container.is_some()
    }
}
