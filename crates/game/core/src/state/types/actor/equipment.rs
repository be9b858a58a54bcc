use crate::state::{EntityId, EquipmentSlot};

/// Weapon/armor slot pair. Each slot references an item held in the same
/// actor's inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Equipment {
    pub weapon: Option<EntityId>,
    pub armor: Option<EntityId>,
}

impl Equipment {
    pub fn slot(&self, slot: EquipmentSlot) -> Option<EntityId> {
        match slot {
            EquipmentSlot::Weapon => self.weapon,
            EquipmentSlot::Armor => self.armor,
        }
    }

    pub fn set_slot(&mut self, slot: EquipmentSlot, item: Option<EntityId>) -> Option<EntityId> {
        let target = match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
        };
        std::mem::replace(target, item)
    }

    pub fn slot_of(&self, item: EntityId) -> Option<EquipmentSlot> {
        if self.weapon == Some(item) {
            Some(EquipmentSlot::Weapon)
        } else if self.armor == Some(item) {
            Some(EquipmentSlot::Armor)
        } else {
            None
        }
    }

    pub fn is_equipped(&self, item: EntityId) -> bool {
        self.slot_of(item).is_some()
    }

    pub fn equipped(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.weapon.iter().chain(self.armor.iter()).copied()
    }
}
