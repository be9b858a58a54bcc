//! Moving items between the floor and an actor's inventory.
//!
//! A carried item leaves the entity list and goes dormant; its `container`
//! points at the carrier. Dropping it puts it back in the world.

use tracing::debug;

use super::equipment::unequip_from_slot;
use super::{ActionError, ActionTransition, DropAction, PickUpAction, TurnCost};
use crate::env::{GameEnv, MessageLog, MessageTone};
use crate::state::{EntityId, GameState};

fn ensure_carried(state: &GameState, actor: EntityId, item: EntityId) -> Result<(), ActionError> {
    let carried = state
        .entities
        .actor(actor)
        .and_then(|data| data.inventory.as_ref())
        .is_some_and(|inventory| inventory.contains(item));
    if carried {
        Ok(())
    } else {
        Err(ActionError::ItemNotCarried { actor, item })
    }
}

/// Moves an owned item into an actor's inventory.
pub fn add_to_inventory(
    state: &mut GameState,
    actor: EntityId,
    item: EntityId,
) -> Result<(), ActionError> {
    let inventory = state
        .entities
        .actor(actor)
        .and_then(|data| data.inventory.as_ref())
        .ok_or(ActionError::MissingCapability {
            actor,
            capability: "inventory",
        })?;
    if inventory.is_full() {
        return Err(ActionError::InventoryFull);
    }
    if state.entities.get(item).and_then(|entity| entity.as_item()).is_none() {
        return Err(ActionError::NotUsable(item));
    }

    state.remove(item)?;
    if let Some(data) = state.entities.get_mut(item).and_then(|entity| entity.as_item_mut()) {
        data.container = Some(actor);
    }
    if let Some(inventory) = state
        .entities
        .actor_mut(actor)
        .and_then(|data| data.inventory.as_mut())
    {
        inventory.insert(item);
    }

    debug!(actor = %actor, item = %item, "item stored");
    Ok(())
}

pub fn pick_up(
    state: &mut GameState,
    messages: &mut dyn MessageLog,
    actor: EntityId,
) -> Result<EntityId, ActionError> {
    let position = state
        .entities
        .get(actor)
        .map(|entity| entity.position)
        .ok_or(ActionError::ActorNotFound(actor))?;
    let item = state
        .entities
        .items_at(position)
        .next()
        .ok_or(ActionError::NothingToPickUp)?;

    add_to_inventory(state, actor, item)?;

    if let Some(entity) = state.entities.get(item) {
        messages.post(format!("You picked up the {}!", entity.name), MessageTone::Neutral);
    }
    Ok(item)
}

/// Puts a carried item back on the floor under the actor, unequipping it first.
pub fn drop(
    state: &mut GameState,
    messages: &mut dyn MessageLog,
    actor: EntityId,
    item: EntityId,
) -> Result<(), ActionError> {
    ensure_carried(state, actor, item)?;

    let equipped_slot = state
        .entities
        .actor(actor)
        .and_then(|data| data.equipment.as_ref())
        .and_then(|equipment| equipment.slot_of(item));
    if let Some(slot) = equipped_slot {
        unequip_from_slot(state, messages, actor, slot, true)?;
    }

    let position = state
        .entities
        .get(actor)
        .map(|entity| entity.position)
        .ok_or(ActionError::ActorNotFound(actor))?;
    if let Some(inventory) = state
        .entities
        .actor_mut(actor)
        .and_then(|data| data.inventory.as_mut())
    {
        inventory.remove(item);
    }
    if let Some(entity) = state.entities.get_mut(item) {
        entity.position = position;
        if let Some(data) = entity.as_item_mut() {
            data.container = None;
        }
    }
    state.add_or_insert(item, None)?;

    if let Some(entity) = state.entities.get(item) {
        messages.post(format!("You dropped the {}.", entity.name), MessageTone::Danger);
    }
    Ok(())
}

/// Uses up a carried item: clears it from the selection and the inventory
/// and destroys it.
pub fn consume(state: &mut GameState, actor: EntityId, item: EntityId) -> Result<(), ActionError> {
    ensure_carried(state, actor, item)?;

    if let Some(inventory) = state
        .entities
        .actor_mut(actor)
        .and_then(|data| data.inventory.as_mut())
    {
        inventory.remove(item);
    }
    state.destroy(item)?;
    debug!(actor = %actor, item = %item, "item consumed");
    Ok(())
}

impl ActionTransition for PickUpAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        messages: &mut dyn MessageLog,
    ) -> Result<TurnCost, ActionError> {
        pick_up(state, messages, self.actor)?;
        Ok(TurnCost::Spent)
    }
}

impl ActionTransition for DropAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        ensure_carried(state, self.actor, self.item)
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        messages: &mut dyn MessageLog,
    ) -> Result<TurnCost, ActionError> {
        drop(state, messages, self.actor, self.item)?;
        Ok(TurnCost::Spent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::equipment::{is_equipped, toggle_equip};
    use crate::env::Message;
    use crate::state::{
        ActorData, ActorRole, Consumable, Entity, Equippable, FighterState, ItemData, Position,
    };

    fn player_with_capacity(capacity: usize) -> GameState {
        let mut state = GameState::empty();
        state
            .spawn(Entity::actor(
                "Player",
                Position::new(2, 2),
                ActorData::new(ActorRole::Player, 8)
                    .with_fighter(FighterState::new(30, 2, 5))
                    .with_inventory(capacity)
                    .with_equipment(),
            ))
            .unwrap();
        state
    }

    fn potion_at(state: &mut GameState, position: Position) -> EntityId {
        state
            .spawn(Entity::item(
                "Health Potion",
                position,
                ItemData::consumable(Consumable::Healing { amount: 4 }),
            ))
            .unwrap()
    }

    #[test]
    fn pick_up_moves_item_out_of_the_world() {
        let mut state = player_with_capacity(2);
        let potion = potion_at(&mut state, Position::new(2, 2));
        let mut messages: Vec<Message> = Vec::new();

        let picked = pick_up(&mut state, &mut messages, EntityId::PLAYER).unwrap();

        assert_eq!(picked, potion);
        assert!(!state.entities.is_listed(potion));
        let item = state.entities.get(potion).unwrap();
        assert_eq!(item.as_item().unwrap().container, Some(EntityId::PLAYER));
        assert!(!item.active);
        assert_eq!(messages[0].text, "You picked up the Health Potion!");
    }

    #[test]
    fn full_inventory_refuses_pick_up() {
        let mut state = player_with_capacity(1);
        potion_at(&mut state, Position::new(2, 2));
        let second = potion_at(&mut state, Position::new(2, 2));
        let mut messages: Vec<Message> = Vec::new();
        pick_up(&mut state, &mut messages, EntityId::PLAYER).unwrap();

        let result = pick_up(&mut state, &mut messages, EntityId::PLAYER);

        assert_eq!(result, Err(ActionError::InventoryFull));
        assert!(state.entities.is_listed(second));
    }

    #[test]
    fn nothing_to_pick_up_elsewhere() {
        let mut state = player_with_capacity(2);
        potion_at(&mut state, Position::new(5, 5));
        let mut messages: Vec<Message> = Vec::new();

        assert_eq!(
            pick_up(&mut state, &mut messages, EntityId::PLAYER),
            Err(ActionError::NothingToPickUp)
        );
    }

    #[test]
    fn dropping_equipped_gear_unequips_it() {
        let mut state = player_with_capacity(2);
        let armor = state
            .spawn(Entity::item(
                "Leather Armor",
                Position::new(2, 2),
                ItemData::equippable(Equippable::armor(1)),
            ))
            .unwrap();
        let mut messages: Vec<Message> = Vec::new();
        pick_up(&mut state, &mut messages, EntityId::PLAYER).unwrap();
        toggle_equip(&mut state, &mut messages, EntityId::PLAYER, armor, true).unwrap();

        drop(&mut state, &mut messages, EntityId::PLAYER, armor).unwrap();

        assert!(!is_equipped(&state, EntityId::PLAYER, armor));
        assert!(state.entities.is_listed(armor));
        assert_eq!(state.entities.get(armor).unwrap().position, Position::new(2, 2));
        assert_eq!(state.defense(EntityId::PLAYER), 2);
    }

    #[test]
    fn consume_destroys_the_item() {
        let mut state = player_with_capacity(2);
        let potion = potion_at(&mut state, Position::new(2, 2));
        add_to_inventory(&mut state, EntityId::PLAYER, potion).unwrap();

        consume(&mut state, EntityId::PLAYER, potion).unwrap();

        assert!(!state.entities.contains(potion));
        let inventory = state.entities.actor(EntityId::PLAYER).unwrap().inventory.as_ref().unwrap();
        assert!(inventory.items.is_empty());
    }
}
