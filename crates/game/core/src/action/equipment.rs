//! Weapon and armor slots.
//!
//! An equipped item stays in its owner's inventory; the slot only references
//! it. Equipping into an occupied slot unequips the occupant first.

use tracing::debug;

use super::{ActionError, ActionTransition, TurnCost, ToggleEquipAction};
use crate::env::{GameEnv, MessageLog, MessageTone};
use crate::state::{EntityId, Equipment, EquipmentSlot, GameState};

fn equipment_mut(state: &mut GameState, actor: EntityId) -> Result<&mut Equipment, ActionError> {
    state
        .entities
        .actor_mut(actor)
        .and_then(|data| data.equipment.as_mut())
        .ok_or(ActionError::MissingCapability {
            actor,
            capability: "equipment",
        })
}

fn item_name(state: &GameState, item: EntityId) -> String {
    state
        .entities
        .get(item)
        .map(|entity| entity.name.clone())
        .unwrap_or_default()
}

pub fn is_equipped(state: &GameState, actor: EntityId, item: EntityId) -> bool {
    state
        .entities
        .actor(actor)
        .and_then(|data| data.equipment.as_ref())
        .is_some_and(|equipment| equipment.is_equipped(item))
}

/// Puts a carried item into `slot`. With `announce` off no message is posted,
/// which is how restores rebuild gear.
pub fn equip_to_slot(
    state: &mut GameState,
    messages: &mut dyn MessageLog,
    actor: EntityId,
    slot: EquipmentSlot,
    item: EntityId,
    announce: bool,
) -> Result<(), ActionError> {
    let carried = state
        .entities
        .actor(actor)
        .and_then(|data| data.inventory.as_ref())
        .is_some_and(|inventory| inventory.contains(item));
    if !carried {
        return Err(ActionError::ItemNotCarried { actor, item });
    }

    if equipment_mut(state, actor)?.slot(slot).is_some() {
        unequip_from_slot(state, messages, actor, slot, announce)?;
    }

    equipment_mut(state, actor)?.set_slot(slot, Some(item));
    if announce {
        let name = item_name(state, item);
        messages.post(format!("You equip the {name}."), MessageTone::Equip);
    }
    debug!(actor = %actor, item = %item, %slot, "item equipped");
    Ok(())
}

pub fn unequip_from_slot(
    state: &mut GameState,
    messages: &mut dyn MessageLog,
    actor: EntityId,
    slot: EquipmentSlot,
    announce: bool,
) -> Result<(), ActionError> {
    let Some(previous) = equipment_mut(state, actor)?.set_slot(slot, None) else {
        return Ok(());
    };

    if announce {
        let name = item_name(state, previous);
        messages.post(format!("You remove the {name}."), MessageTone::Unequip);
    }
    debug!(actor = %actor, item = %previous, %slot, "item unequipped");
    Ok(())
}

/// Unequips the item if it sits in its slot, equips it otherwise.
pub fn toggle_equip(
    state: &mut GameState,
    messages: &mut dyn MessageLog,
    actor: EntityId,
    item: EntityId,
    announce: bool,
) -> Result<(), ActionError> {
    let slot = state
        .entities
        .get(item)
        .and_then(|entity| entity.as_item())
        .and_then(|data| data.equippable)
        .map(|equippable| equippable.slot)
        .ok_or(ActionError::NotEquippable(item))?;

    if equipment_mut(state, actor)?.slot(slot) == Some(item) {
        unequip_from_slot(state, messages, actor, slot, announce)
    } else {
        equip_to_slot(state, messages, actor, slot, item, announce)
    }
}

impl ActionTransition for ToggleEquipAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        messages: &mut dyn MessageLog,
    ) -> Result<TurnCost, ActionError> {
        toggle_equip(state, messages, self.actor, self.item, true)?;
        Ok(TurnCost::Spent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::inventory::add_to_inventory;
    use crate::env::Message;
    use crate::state::{ActorData, ActorRole, Entity, Equippable, FighterState, ItemData, Position};

    fn outfitted() -> (GameState, EntityId, EntityId) {
        let mut state = GameState::empty();
        state
            .spawn(Entity::actor(
                "Player",
                Position::new(0, 0),
                ActorData::new(ActorRole::Player, 8)
                    .with_fighter(FighterState::new(30, 1, 2))
                    .with_inventory(5)
                    .with_equipment(),
            ))
            .unwrap();
        let dagger = state
            .spawn(Entity::item(
                "Dagger",
                Position::new(0, 0),
                ItemData::equippable(Equippable::weapon(2)),
            ))
            .unwrap();
        let sword = state
            .spawn(Entity::item(
                "Sword",
                Position::new(0, 0),
                ItemData::equippable(Equippable::weapon(4)),
            ))
            .unwrap();
        add_to_inventory(&mut state, EntityId::PLAYER, dagger).unwrap();
        add_to_inventory(&mut state, EntityId::PLAYER, sword).unwrap();
        (state, dagger, sword)
    }

    #[test]
    fn equipping_an_occupied_slot_swaps_items() {
        let (mut state, dagger, sword) = outfitted();
        let mut messages: Vec<Message> = Vec::new();

        toggle_equip(&mut state, &mut messages, EntityId::PLAYER, dagger, true).unwrap();
        toggle_equip(&mut state, &mut messages, EntityId::PLAYER, sword, true).unwrap();

        assert!(is_equipped(&state, EntityId::PLAYER, sword));
        assert!(!is_equipped(&state, EntityId::PLAYER, dagger));
        assert_eq!(state.power(EntityId::PLAYER), 6);
        let texts: Vec<_> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(
            texts,
            ["You equip the Dagger.", "You remove the Dagger.", "You equip the Sword."]
        );
    }

    #[test]
    fn toggling_twice_unequips() {
        let (mut state, dagger, _) = outfitted();
        let mut messages: Vec<Message> = Vec::new();

        toggle_equip(&mut state, &mut messages, EntityId::PLAYER, dagger, false).unwrap();
        toggle_equip(&mut state, &mut messages, EntityId::PLAYER, dagger, false).unwrap();

        assert!(!is_equipped(&state, EntityId::PLAYER, dagger));
        assert!(messages.is_empty());
    }
}
