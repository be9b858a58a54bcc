use tracing::trace;

use super::PursueState;
use crate::action::Action;
use crate::config::GameConfig;
use crate::env::Pathfinder;
use crate::state::{EntityId, GameState};

pub(super) fn decide(
    state: &mut GameState,
    paths: &dyn Pathfinder,
    config: &GameConfig,
    actor: EntityId,
    pursue: &mut PursueState,
) -> Action {
    let target = select_target(state, actor);

    let (Some(target), Some(origin)) = (target, state.entities.get(actor).map(|e| e.position))
    else {
        return Action::wait(actor);
    };
    let Some(target_position) = state.entities.get(target).map(|e| e.position) else {
        return Action::wait(actor);
    };

    if !pursue.engaged {
        let sees_target = state
            .entities
            .actor(actor)
            .is_some_and(|data| data.can_see(target_position));
        if sees_target {
            trace!(actor = %actor, target = %target, "pursuer engaged");
            pursue.engaged = true;
        }
    }

    if !pursue.engaged {
        return Action::wait(actor);
    }

    if origin.distance(target_position) <= config.melee_range {
        return Action::melee(actor, target);
    }

    let direction = paths.direction_towards(&state.map, origin, target_position);
    if direction.is_zero() {
        return Action::wait(actor);
    }
    Action::move_by(actor, direction)
}

/// Assigns the player as target when none is set and drops a target that is
/// no longer alive.
fn select_target(state: &mut GameState, actor: EntityId) -> Option<EntityId> {
    let player_present = state.entities.contains(EntityId::PLAYER);
    let current = state
        .entities
        .actor(actor)?
        .fighter
        .as_ref()?
        .target
        .or(player_present.then_some(EntityId::PLAYER));

    let target = current.filter(|target| {
        state
            .entities
            .actor(*target)
            .is_some_and(|data| data.alive)
    });

    let fighter = state.entities.actor_mut(actor)?.fighter.as_mut()?;
    fighter.target = target;
    target
}
