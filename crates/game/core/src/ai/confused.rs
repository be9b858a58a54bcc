use tracing::{debug, trace};

use super::{AiPolicy, ConfusedState};
use crate::action::{Action, ActionError};
use crate::env::{RngOracle, compute_seed};
use crate::state::{EntityId, GameState, Offset};

/// Seed context for the stumble direction roll.
const STUMBLE_CONTEXT: u32 = 0x5354;

pub(super) enum ConfusedTurn {
    Stumble(ConfusedState, Action),
    Reverted(AiPolicy),
}

pub(super) fn decide(
    state: &GameState,
    rng: &dyn RngOracle,
    actor: EntityId,
    mut confused: ConfusedState,
) -> ConfusedTurn {
    if confused.turns_remaining <= 0 {
        return ConfusedTurn::Reverted(*confused.previous);
    }

    let seed = compute_seed(state.game_seed, state.nonce, actor.0, STUMBLE_CONTEXT);
    let direction = Offset::NEIGHBORS[rng.pick_index(seed, Offset::NEIGHBORS.len())];
    confused.turns_remaining -= 1;

    trace!(
        actor = %actor,
        dx = direction.dx,
        dy = direction.dy,
        turns_remaining = confused.turns_remaining,
        "confused actor stumbles"
    );
    ConfusedTurn::Stumble(confused, Action::bump(actor, direction))
}

/// Wraps the target's current policy in a confused one lasting `turns`.
///
/// Fails without touching the target when it is still confused, or when it
/// is not a living actor with a policy of its own.
pub fn apply_confusion(
    state: &mut GameState,
    target: EntityId,
    turns: i32,
) -> Result<(), ActionError> {
    let data = state
        .entities
        .actor_mut(target)
        .filter(|data| data.alive && !data.is_player())
        .ok_or(ActionError::InvalidTarget(target))?;

    let current = match data.ai.take() {
        Some(policy) if policy.is_actively_confused() => {
            data.ai = Some(policy);
            return Err(ActionError::AlreadyConfused(target));
        }
        // Spent confusion that never got a turn to revert: wrap what it remembers.
        Some(AiPolicy::Confused(spent)) => *spent.previous,
        Some(policy) => policy,
        None => return Err(ActionError::InvalidTarget(target)),
    };

    data.ai = Some(AiPolicy::confused(current, turns));
    debug!(target = %target, turns, "confusion applied");
    Ok(())
}
