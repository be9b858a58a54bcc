//! Non-player decision making.
//!
//! A policy is a closed union: [`AiPolicy::Pursue`] chases and attacks the
//! player, [`AiPolicy::Confused`] stumbles in random directions for a number of
//! turns and then hands control back to the policy it wraps. A policy only
//! *decides*; the returned [`Action`] is executed by the engine like any other.

mod confused;
mod pursue;

pub use confused::apply_confusion;

use strum::{Display, EnumString, IntoStaticStr};
use tracing::debug;

use crate::action::Action;
use crate::env::{GameEnv, MessageLog, MessageTone, OracleError};
use crate::state::{EntityId, GameState};

/// Type tag of a policy, as written into snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiKind {
    Pursue,
    Confused,
}

/// Pursue sub-state. `engaged` latches the first time the target is seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PursueState {
    pub engaged: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusedState {
    /// Policy restored once the countdown runs out.
    pub previous: Box<AiPolicy>,
    pub turns_remaining: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AiPolicy {
    Pursue(PursueState),
    Confused(ConfusedState),
}

impl AiPolicy {
    /// Default hostile policy, not yet engaged.
    pub fn pursue() -> Self {
        AiPolicy::Pursue(PursueState::default())
    }

    pub fn confused(previous: AiPolicy, turns_remaining: i32) -> Self {
        AiPolicy::Confused(ConfusedState {
            previous: Box::new(previous),
            turns_remaining,
        })
    }

    pub fn kind(&self) -> AiKind {
        match self {
            AiPolicy::Pursue(_) => AiKind::Pursue,
            AiPolicy::Confused(_) => AiKind::Confused,
        }
    }

    /// Confused with turns still to stumble.
    pub fn is_actively_confused(&self) -> bool {
        matches!(self, AiPolicy::Confused(state) if state.turns_remaining > 0)
    }
}

/// Runs the actor's policy and returns the action it chose.
///
/// Actors without a policy wait. A confused policy whose countdown has run out
/// is replaced by the policy it remembers, which then decides this same turn.
pub fn decide_turn(
    state: &mut GameState,
    env: &GameEnv<'_>,
    messages: &mut dyn MessageLog,
    actor: EntityId,
) -> Result<Action, OracleError> {
    let paths = env.paths()?;
    let rng = env.rng()?;

    let Some(policy) = state.entities.actor_mut(actor).and_then(|data| data.ai.take()) else {
        return Ok(Action::wait(actor));
    };

    let (policy, action) = match policy {
        AiPolicy::Pursue(mut pursue) => {
            let action = pursue::decide(state, paths, env.config(), actor, &mut pursue);
            (AiPolicy::Pursue(pursue), action)
        }
        AiPolicy::Confused(confused) => match confused::decide(state, rng, actor, confused) {
            confused::ConfusedTurn::Stumble(confused, action) => {
                (AiPolicy::Confused(confused), action)
            }
            confused::ConfusedTurn::Reverted(previous) => {
                debug!(actor = %actor, restored = %previous.kind(), "confusion wore off");
                if let Some(entity) = state.entities.get_mut(actor) {
                    messages.post(
                        format!("The {} is no longer confused.", entity.name),
                        MessageTone::Danger,
                    );
                    if let Some(data) = entity.as_actor_mut() {
                        data.ai = Some(previous);
                    }
                }
                return decide_turn(state, env, messages, actor);
            }
        },
    };

    if let Some(data) = state.entities.actor_mut(actor) {
        data.ai = Some(policy);
    }
    Ok(action)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::action::{BumpAction, MeleeAction, MoveAction};
    use crate::config::GameConfig;
    use crate::env::{Message, Pathfinder, PcgRng};
    use crate::state::{
        ActorData, ActorRole, Entity, FighterState, MapMemory, Offset, Position, TileKind,
    };

    struct StraightLine;

    impl Pathfinder for StraightLine {
        fn direction_towards(&self, _: &MapMemory, origin: Position, target: Position) -> Offset {
            Offset::towards(origin, target)
        }
    }

    fn open_state() -> GameState {
        let mut state = GameState::empty();
        state.map = MapMemory::new(10, 10);
        for x in 0..10 {
            for y in 0..10 {
                state.map.set_tile(Position::new(x, y), TileKind::Floor);
            }
        }
        state
            .spawn(Entity::actor(
                "Player",
                Position::new(0, 0),
                ActorData::new(ActorRole::Player, 8).with_fighter(FighterState::new(30, 2, 5)),
            ))
            .unwrap();
        state
    }

    fn spawn_orc(state: &mut GameState, at: Position, ai: AiPolicy) -> EntityId {
        let mut data = ActorData::new(ActorRole::Npc, 8)
            .with_fighter(FighterState::new(10, 0, 3))
            .with_ai(ai);
        data.field_of_view = BTreeSet::from([Position::new(0, 0)]);
        state.spawn(Entity::actor("Orc", at, data)).unwrap()
    }

    fn decide(state: &mut GameState, actor: EntityId) -> (Action, Vec<Message>) {
        let config = GameConfig::default();
        let env = GameEnv::new(&config)
            .with_paths(&StraightLine)
            .with_rng(&PcgRng);
        let mut messages = Vec::new();
        let action = decide_turn(state, &env, &mut messages, actor).unwrap();
        (action, messages)
    }

    #[test]
    fn engaged_pursuer_moves_when_far_and_attacks_when_adjacent() {
        let mut state = open_state();
        let engaged = AiPolicy::Pursue(PursueState { engaged: true });
        let far = spawn_orc(&mut state, Position::new(3, 1), engaged.clone());
        let near = spawn_orc(&mut state, Position::new(1, 1), engaged);

        let (far_action, _) = decide(&mut state, far);
        let (near_action, _) = decide(&mut state, near);

        assert_eq!(
            far_action,
            Action::Move(MoveAction {
                actor: far,
                direction: Offset::new(-1, -1)
            })
        );
        assert_eq!(
            near_action,
            Action::Melee(MeleeAction {
                actor: near,
                target: EntityId::PLAYER
            })
        );
    }

    #[test]
    fn pursuer_engages_on_sight_and_remembers_the_chase() {
        let mut state = open_state();
        let orc = spawn_orc(&mut state, Position::new(5, 5), AiPolicy::pursue());

        decide(&mut state, orc);
        assert_eq!(
            state.entities.actor(orc).unwrap().ai,
            Some(AiPolicy::Pursue(PursueState { engaged: true }))
        );

        state.entities.actor_mut(orc).unwrap().field_of_view.clear();
        let (action, _) = decide(&mut state, orc);
        assert!(matches!(action, Action::Move(_)));
    }

    #[test]
    fn idle_pursuer_without_sight_waits() {
        let mut state = open_state();
        let orc = spawn_orc(&mut state, Position::new(5, 5), AiPolicy::pursue());
        state.entities.actor_mut(orc).unwrap().field_of_view.clear();

        let (action, _) = decide(&mut state, orc);

        assert_eq!(action, Action::wait(orc));
        let fighter = state.entities.actor(orc).unwrap().fighter.as_ref().unwrap();
        assert_eq!(fighter.target, Some(EntityId::PLAYER));
    }

    #[test]
    fn dead_target_is_dropped() {
        let mut state = open_state();
        let orc = spawn_orc(
            &mut state,
            Position::new(1, 0),
            AiPolicy::Pursue(PursueState { engaged: true }),
        );
        state.entities.actor_mut(EntityId::PLAYER).unwrap().alive = false;

        let (action, _) = decide(&mut state, orc);

        assert_eq!(action, Action::wait(orc));
        let fighter = state.entities.actor(orc).unwrap().fighter.as_ref().unwrap();
        assert_eq!(fighter.target, None);
    }

    #[test]
    fn confusion_reverts_after_exactly_its_duration() {
        let mut state = open_state();
        let previous = AiPolicy::Pursue(PursueState { engaged: true });
        let orc = spawn_orc(&mut state, Position::new(5, 5), previous.clone());
        let duration = 4;
        apply_confusion(&mut state, orc, duration).unwrap();

        for turn in 0..duration {
            let (action, messages) = decide(&mut state, orc);
            assert!(matches!(action, Action::Bump(BumpAction { .. })), "turn {turn}");
            assert!(messages.is_empty());
            state.nonce += 1;
        }

        let (action, messages) = decide(&mut state, orc);

        assert_eq!(state.entities.actor(orc).unwrap().ai, Some(previous));
        assert!(matches!(action, Action::Move(_)));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "The Orc is no longer confused.");
    }

    #[test]
    fn stumbling_picks_one_of_the_eight_neighbours() {
        let mut state = open_state();
        let orc = spawn_orc(&mut state, Position::new(5, 5), AiPolicy::pursue());
        apply_confusion(&mut state, orc, 50).unwrap();

        for nonce in 0..50 {
            state.nonce = nonce;
            let (action, _) = decide(&mut state, orc);
            let Action::Bump(bump) = action else {
                panic!("confused actor must bump");
            };
            assert!(Offset::NEIGHBORS.contains(&bump.direction));
        }
    }
}
