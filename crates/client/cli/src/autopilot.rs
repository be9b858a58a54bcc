//! Picks the player's next move.

use game_core::action::equipment::is_equipped;
use game_core::{
    Action, ActivateAction, Consumable, EntityId, GameState, LevelUpAction, LevelUpChoice,
    Pathfinder, PickUpAction, Position, TileKind,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Act(Action),
    Descend,
}

/// Heal below this fraction of max hp, in percent.
const HEAL_BELOW_PERCENT: i32 = 40;

pub fn decide(state: &GameState, paths: &dyn Pathfinder) -> Decision {
    let Some(player) = state.player() else {
        return Decision::Act(Action::wait(EntityId::PLAYER));
    };
    let origin = player.position;
    let act = |action| Decision::Act(action);

    if let Some(choice) = pending_level_up(state) {
        return act(Action::LevelUp(LevelUpAction {
            actor: EntityId::PLAYER,
            choice,
        }));
    }
    if let Some(item) = healing_needed(state) {
        return act(Action::Activate(ActivateAction {
            actor: EntityId::PLAYER,
            item,
        }));
    }
    if let Some(item) = unworn_gear(state) {
        return act(Action::Activate(ActivateAction {
            actor: EntityId::PLAYER,
            item,
        }));
    }

    if let Some((target, position)) = nearest_visible_monster(state, origin) {
        if position.chebyshev(origin) <= 1 {
            return act(Action::melee(EntityId::PLAYER, target));
        }
        if let Some(step) = step_towards(state, paths, origin, position) {
            return step;
        }
    }

    if has_room(state) {
        if state.entities.items_at(origin).next().is_some() {
            return act(Action::PickUp(PickUpAction {
                actor: EntityId::PLAYER,
            }));
        }
        if let Some(position) = nearest_visible_item(state, origin)
            && let Some(step) = step_towards(state, paths, origin, position)
        {
            return step;
        }
    }

    match state.map.find(TileKind::DownStairs) {
        Some(stairs) if stairs == origin => Decision::Descend,
        Some(stairs) => step_towards(state, paths, origin, stairs)
            .unwrap_or_else(|| act(Action::wait(EntityId::PLAYER))),
        None => act(Action::wait(EntityId::PLAYER)),
    }
}

/// `None` when no step gets closer.
fn step_towards(
    state: &GameState,
    paths: &dyn Pathfinder,
    origin: Position,
    target: Position,
) -> Option<Decision> {
    let direction = paths.direction_towards(&state.map, origin, target);
    (!direction.is_zero()).then(|| Decision::Act(Action::bump(EntityId::PLAYER, direction)))
}

fn has_room(state: &GameState) -> bool {
    state
        .entities
        .actor(EntityId::PLAYER)
        .and_then(|data| data.inventory.as_ref())
        .is_some_and(|inventory| inventory.items.len() < inventory.capacity)
}

fn pending_level_up(state: &GameState) -> Option<LevelUpChoice> {
    let level = state.entities.actor(EntityId::PLAYER)?.level?;
    if level.state.level_points <= 0 {
        return None;
    }
    let choice = match level.state.current_level % 3 {
        0 => LevelUpChoice::Defense,
        1 => LevelUpChoice::MaxHp,
        _ => LevelUpChoice::Power,
    };
    Some(choice)
}

fn carried(state: &GameState) -> Vec<EntityId> {
    state
        .entities
        .actor(EntityId::PLAYER)
        .and_then(|data| data.inventory.as_ref())
        .map(|inventory| inventory.items.clone())
        .unwrap_or_default()
}

fn healing_needed(state: &GameState) -> Option<EntityId> {
    let fighter = state.entities.actor(EntityId::PLAYER)?.fighter.as_ref()?;
    if fighter.hp() * 100 >= fighter.max_hp() * HEAL_BELOW_PERCENT {
        return None;
    }
    carried(state).into_iter().find(|item| {
        state
            .entities
            .get(*item)
            .and_then(|entity| entity.as_item())
            .is_some_and(|data| matches!(data.consumable, Some(Consumable::Healing { .. })))
    })
}

/// A carried equippable whose slot is empty.
fn unworn_gear(state: &GameState) -> Option<EntityId> {
    let equipment = state.entities.actor(EntityId::PLAYER)?.equipment.as_ref()?;
    carried(state).into_iter().find(|item| {
        let slot = state
            .entities
            .get(*item)
            .and_then(|entity| entity.as_item())
            .and_then(|data| data.equippable)
            .map(|equippable| equippable.slot);
        slot.is_some_and(|slot| equipment.slot(slot).is_none())
            && !is_equipped(state, EntityId::PLAYER, *item)
    })
}

fn nearest_visible_monster(state: &GameState, origin: Position) -> Option<(EntityId, Position)> {
    state
        .entities
        .entities()
        .filter(|entity| entity.visible && !entity.is_player())
        .filter(|entity| entity.as_actor().is_some_and(|data| data.alive))
        .min_by_key(|entity| entity.position.chebyshev(origin))
        .map(|entity| (entity.id, entity.position))
}

fn nearest_visible_item(state: &GameState, origin: Position) -> Option<Position> {
    state
        .entities
        .entities()
        .filter(|entity| entity.visible && entity.as_item().is_some())
        .min_by_key(|entity| entity.position.chebyshev(origin))
        .map(|entity| entity.position)
}
