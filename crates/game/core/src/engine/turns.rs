//! Cooperative turn rotation.
//!
//! The head of the rotation acts. Ending a turn moves it to the tail and arms
//! a wait of `delay`; [`GameEngine::tick`] burns elapsed time against that
//! wait and advances whenever it runs out, until the player is up.

use std::time::Duration;

use tracing::{debug, trace, warn};

use super::{GameEngine, TurnError};
use crate::env::GameEnv;
use crate::state::EntityId;

/// Outcome of a single [`GameEngine::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// The player is at the head; the engine waits for input.
    PlayerTurn,
    /// A non-player actor took its turn.
    Acted(EntityId),
}

/// What a [`GameEngine::tick`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub turns_taken: usize,
    pub player_turn: bool,
}

impl<'a> GameEngine<'a> {
    /// Upper bound on turns run by one tick, so a zero delay cannot spin forever.
    const MAX_TURNS_PER_TICK: usize = 1024;

    pub fn is_player_turn(&self) -> bool {
        self.state.turn.player_turn
    }

    /// Runs the actor at the head of the rotation without removing it.
    pub fn advance(&mut self, env: &GameEnv<'_>) -> Result<Advance, TurnError> {
        if self.state.restoring {
            return Err(TurnError::RestoreInProgress);
        }
        let head = self.state.turn.head().ok_or(TurnError::NoActors)?;

        if head.is_player() {
            if !self.state.turn.player_turn {
                trace!(nonce = self.state.nonce, "player turn");
            }
            self.state.turn.player_turn = true;
            self.state.turn.pending = None;
            return Ok(Advance::PlayerTurn);
        }

        if self.state.entities.is_listed_actor(head) {
            self.run_npc_turn(env, head)?;
        } else {
            warn!(actor = %head, "rotation head is not a listed actor, skipping");
        }
        self.end_turn();
        Ok(Advance::Acted(head))
    }

    /// Moves the head to the tail, clears the player flag and arms the wait
    /// before the next advance.
    pub fn end_turn(&mut self) {
        let turn = &mut self.state.turn;
        let Some(actor) = turn.rotate() else {
            return;
        };
        if actor.is_player() {
            turn.player_turn = false;
        }
        turn.pending = Some(turn.delay);
        trace!(actor = %actor, delay_ms = turn.delay.as_millis() as u64, "turn ended");
        self.state.nonce += 1;
    }

    /// Feeds elapsed time to the rotation.
    ///
    /// Runs as many turns as the time covers and stops at the player's turn,
    /// carrying any unused wait into the next call. Does nothing while a
    /// restore is running.
    pub fn tick(&mut self, env: &GameEnv<'_>, elapsed: Duration) -> Result<TickReport, TurnError> {
        let mut report = TickReport::default();
        if self.state.restoring {
            return Ok(report);
        }

        let mut budget = elapsed;
        while !self.state.turn.player_turn && report.turns_taken < Self::MAX_TURNS_PER_TICK {
            match self.state.turn.pending {
                Some(wait) if wait > budget => {
                    self.state.turn.pending = Some(wait - budget);
                    break;
                }
                Some(wait) => {
                    budget -= wait;
                    self.state.turn.pending = None;
                }
                None => {}
            }

            if let Advance::Acted(_) = self.advance(env)? {
                report.turns_taken += 1;
            }
        }

        report.player_turn = self.state.turn.player_turn;
        if report.turns_taken > 0 {
            debug!(turns = report.turns_taken, player_turn = report.player_turn, "tick");
        }
        Ok(report)
    }

    /// Hands control back to the rotation after a restore: clears any stale
    /// wait and advances, which lands on the player at the head.
    pub fn resume(&mut self, env: &GameEnv<'_>) -> Result<Advance, TurnError> {
        self.state.turn.player_turn = false;
        self.state.turn.pending = None;
        self.advance(env)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::action::{Action, TurnCost};
    use crate::ai::AiPolicy;
    use crate::config::GameConfig;
    use crate::env::{FieldOfView, Message, Pathfinder, PcgRng};
    use crate::state::{
        ActorData, ActorRole, Entity, FighterState, GameState, MapMemory, Offset, Position,
        TileKind,
    };

    struct Blind;

    impl FieldOfView for Blind {
        fn compute(&self, _: &MapMemory, origin: Position, _: u32) -> BTreeSet<Position> {
            BTreeSet::from([origin])
        }
    }

    struct Still;

    impl Pathfinder for Still {
        fn direction_towards(&self, _: &MapMemory, _: Position, _: Position) -> Offset {
            Offset::ZERO
        }
    }

    const BASE: Duration = Duration::from_millis(90);

    fn populated(npcs: usize) -> GameState {
        let config = GameConfig::default().with_base_turn_interval(BASE);
        let mut state = GameState::new(7, &config);
        for x in 0..10 {
            state.map.set_tile(Position::new(x, 0), TileKind::Floor);
        }
        state
            .spawn(Entity::actor(
                "Player",
                Position::new(0, 0),
                ActorData::new(ActorRole::Player, 8).with_fighter(FighterState::new(30, 2, 5)),
            ))
            .unwrap();
        for n in 0..npcs {
            state
                .spawn(Entity::actor(
                    "Orc",
                    Position::new(5 + n as i32, 0),
                    ActorData::new(ActorRole::Npc, 8)
                        .with_fighter(FighterState::new(10, 0, 3))
                        .with_ai(AiPolicy::pursue()),
                ))
                .unwrap();
        }
        state
    }

    fn with_engine<R>(
        state: &mut GameState,
        f: impl FnOnce(&mut GameEngine<'_>, &GameEnv<'_>) -> R,
    ) -> R {
        let config = GameConfig::default().with_base_turn_interval(BASE);
        let env = GameEnv::new(&config)
            .with_fov(&Blind)
            .with_paths(&Still)
            .with_rng(&PcgRng);
        let mut messages: Vec<Message> = Vec::new();
        let mut engine = GameEngine::new(state, &mut messages);
        f(&mut engine, &env)
    }

    #[test]
    fn first_tick_lands_on_the_player() {
        let mut state = populated(2);

        let report =
            with_engine(&mut state, |engine, env| engine.tick(env, Duration::ZERO)).unwrap();

        assert!(report.player_turn);
        assert_eq!(report.turns_taken, 0);
    }

    #[test]
    fn npc_turns_are_paced_by_delay() {
        let mut state = populated(2);
        let delay = BASE / 3;

        with_engine(&mut state, |engine, env| {
            engine.tick(env, Duration::ZERO).unwrap();
            let cost = engine
                .player_action(env, &Action::wait(EntityId::PLAYER))
                .unwrap();
            assert_eq!(cost, TurnCost::Spent);

            let report = engine.tick(env, delay - Duration::from_millis(1)).unwrap();
            assert_eq!(report.turns_taken, 0);

            let report = engine.tick(env, Duration::from_millis(1)).unwrap();
            assert_eq!(report.turns_taken, 1);
            assert!(!report.player_turn);

            let report = engine.tick(env, delay * 2).unwrap();
            assert_eq!(report.turns_taken, 1);
            assert!(report.player_turn);
        });
    }

    #[test]
    fn rotation_order_is_restored_after_a_full_round() {
        let mut state = populated(3);
        let before = state.turn.rotation.clone();

        with_engine(&mut state, |engine, env| {
            engine.tick(env, Duration::ZERO).unwrap();
            engine
                .player_action(env, &Action::wait(EntityId::PLAYER))
                .unwrap();
            engine.tick(env, BASE * 10).unwrap();
        });

        assert_eq!(state.turn.rotation, before);
        assert_eq!(state.nonce, 4);
    }

    #[test]
    fn player_input_is_refused_out_of_turn() {
        let mut state = populated(1);

        let result = with_engine(&mut state, |engine, env| {
            engine.player_action(env, &Action::wait(EntityId::PLAYER))
        });

        assert_eq!(result, Err(TurnError::NotPlayerTurn));
    }

    #[test]
    fn restoring_gates_turns() {
        let mut state = populated(1);
        state.restoring = true;

        with_engine(&mut state, |engine, env| {
            assert_eq!(engine.tick(env, BASE).unwrap(), TickReport::default());
            assert_eq!(engine.advance(env), Err(TurnError::RestoreInProgress));
        });
    }

    #[test]
    fn empty_rotation_is_an_error() {
        let mut state = GameState::empty();

        let result = with_engine(&mut state, |engine, env| engine.advance(env));

        assert_eq!(result, Err(TurnError::NoActors));
    }
}
