//! Single-use items.
//!
//! Healing applies on activation. Lightning, fireball and confusion put the
//! user into targeting mode: the item becomes the inventory's selection and a
//! later [`CastAction`] releases it at a cell.

use tracing::debug;

use super::combat::apply_damage;
use super::equipment::toggle_equip;
use super::inventory::consume;
use super::{
    ActionError, ActionTransition, ActivateAction, CancelTargetingAction, CastAction, TurnCost,
};
use crate::ai::apply_confusion;
use crate::env::{GameEnv, MessageLog, MessageTone};
use crate::state::{Consumable, EntityId, GameState, ItemData, Position, Targeting};

fn carried_item(
    state: &GameState,
    actor: EntityId,
    item: EntityId,
) -> Result<(String, ItemData), ActionError> {
    let carried = state
        .entities
        .actor(actor)
        .and_then(|data| data.inventory.as_ref())
        .is_some_and(|inventory| inventory.contains(item));
    let entity = state
        .entities
        .get(item)
        .filter(|_| carried)
        .ok_or(ActionError::ItemNotCarried { actor, item })?;
    let data = entity
        .as_item()
        .cloned()
        .ok_or(ActionError::NotUsable(item))?;
    Ok((entity.name.clone(), data))
}

fn set_targeting(state: &mut GameState, actor: EntityId, selection: Option<(EntityId, Targeting)>) {
    if let Some(data) = state.entities.actor_mut(actor) {
        if let Some(inventory) = data.inventory.as_mut() {
            inventory.selected = selection.map(|(item, _)| item);
        }
        data.targeting = selection.map(|(_, targeting)| targeting);
    }
}

/// Consumes the selected item and leaves targeting mode.
fn finish_cast(state: &mut GameState, actor: EntityId, item: EntityId) -> Result<(), ActionError> {
    consume(state, actor, item)?;
    set_targeting(state, actor, None);
    Ok(())
}

fn living_actor_at(state: &GameState, position: Position) -> Option<EntityId> {
    state
        .entities
        .actor_at_position(position)
        .filter(|id| state.entities.actor(*id).is_some_and(|data| data.alive))
}

impl ActionTransition for ActivateAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        carried_item(state, self.actor, self.item).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        messages: &mut dyn MessageLog,
    ) -> Result<TurnCost, ActionError> {
        let (name, data) = carried_item(state, self.actor, self.item)?;

        let Some(consumable) = data.consumable else {
            if data.equippable.is_some() {
                toggle_equip(state, messages, self.actor, self.item, true)?;
                return Ok(TurnCost::Spent);
            }
            return Err(ActionError::NotUsable(self.item));
        };

        match consumable {
            Consumable::Healing { amount } => {
                let recovered = state
                    .entities
                    .actor_mut(self.actor)
                    .and_then(|actor| actor.fighter.as_mut())
                    .map_or(0, |fighter| fighter.heal(amount));

                if recovered > 0 {
                    messages.post(
                        format!("You consume the {name}, and recover {recovered} HP!"),
                        MessageTone::Good,
                    );
                    consume(state, self.actor, self.item)?;
                    Ok(TurnCost::Spent)
                } else {
                    messages.post("Your health is already full.".to_string(), MessageTone::Muted);
                    Ok(TurnCost::Free)
                }
            }
            Consumable::Lightning { .. } => {
                set_targeting(state, self.actor, Some((self.item, Targeting::Single)));
                messages.post("Select a target to strike.".to_string(), MessageTone::Prompt);
                Ok(TurnCost::Free)
            }
            Consumable::Fireball { radius, .. } => {
                set_targeting(state, self.actor, Some((self.item, Targeting::Area { radius })));
                messages.post(
                    "Select a location to throw a fireball.".to_string(),
                    MessageTone::Prompt,
                );
                Ok(TurnCost::Free)
            }
            Consumable::Confusion { .. } => {
                set_targeting(state, self.actor, Some((self.item, Targeting::Single)));
                messages.post("Select a target to confuse.".to_string(), MessageTone::Prompt);
                Ok(TurnCost::Free)
            }
        }
    }
}

impl ActionTransition for CastAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        messages: &mut dyn MessageLog,
    ) -> Result<TurnCost, ActionError> {
        let caster = self.actor;
        let item = state
            .entities
            .actor(caster)
            .and_then(|data| data.inventory.as_ref())
            .and_then(|inventory| inventory.selected)
            .ok_or(ActionError::NoSelection)?;
        let (_, data) = carried_item(state, caster, item)?;
        let consumable = data.consumable.ok_or(ActionError::NotUsable(item))?;
        let origin = state
            .entities
            .get(caster)
            .map(|entity| entity.position)
            .ok_or(ActionError::ActorNotFound(caster))?;

        match consumable {
            Consumable::Lightning { damage, range } => {
                let target = living_actor_at(state, self.target)
                    .filter(|target| *target != caster)
                    .ok_or(ActionError::InvalidTarget(EntityId::UNASSIGNED))?;
                if origin.distance(self.target) > range as f32 {
                    return Err(ActionError::InvalidTarget(target));
                }

                let name = state.entities.get(target).map(|e| e.name.clone()).unwrap_or_default();
                messages.post(
                    format!(
                        "A lightning bolt strikes the {name} with a loud thunder, for {damage} damage!"
                    ),
                    MessageTone::Neutral,
                );
                apply_damage(state, env.config(), messages, target, damage);
            }
            Consumable::Fireball { damage, radius } => {
                let targets: Vec<EntityId> = state
                    .entities
                    .actor_ids()
                    .iter()
                    .copied()
                    .filter(|id| {
                        state.entities.get(*id).is_some_and(|entity| {
                            entity.as_actor().is_some_and(|data| data.alive)
                                && entity.position.distance(self.target) <= radius as f32
                        })
                    })
                    .collect();
                if targets.is_empty() {
                    return Err(ActionError::NoTargetsInRadius);
                }

                for target in targets {
                    let name =
                        state.entities.get(target).map(|e| e.name.clone()).unwrap_or_default();
                    messages.post(
                        format!(
                            "The {name} is engulfed in a fiery explosion, taking {damage} damage!"
                        ),
                        MessageTone::Danger,
                    );
                    apply_damage(state, env.config(), messages, target, damage);
                }
            }
            Consumable::Confusion { turns } => {
                let target = living_actor_at(state, self.target)
                    .filter(|target| *target != caster)
                    .ok_or(ActionError::InvalidTarget(EntityId::UNASSIGNED))?;
                let name = state.entities.get(target).map(|e| e.name.clone()).unwrap_or_default();

                match apply_confusion(state, target, turns) {
                    Ok(()) => messages.post(
                        format!(
                            "The eyes of the {name} look vacant, as it starts to stumble around!"
                        ),
                        MessageTone::Danger,
                    ),
                    Err(ActionError::AlreadyConfused(_)) => {
                        messages.post(
                            format!("The {name} is already confused."),
                            MessageTone::Danger,
                        );
                        set_targeting(state, caster, None);
                        debug!(target = %target, "confusion refused, scroll kept");
                        return Ok(TurnCost::Free);
                    }
                    Err(error) => return Err(error),
                }
            }
            Consumable::Healing { .. } => return Err(ActionError::NotUsable(item)),
        }

        finish_cast(state, caster, item)?;
        Ok(TurnCost::Spent)
    }
}

impl ActionTransition for CancelTargetingAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        _messages: &mut dyn MessageLog,
    ) -> Result<TurnCost, ActionError> {
        set_targeting(state, self.actor, None);
        Ok(TurnCost::Free)
    }
}
