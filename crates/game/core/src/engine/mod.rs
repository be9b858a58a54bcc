//! Turn scheduling and action execution.
//!
//! The [`GameEngine`] drives the turn rotation of [`GameState`]. It asks
//! non-player policies for their action, executes actions through the action
//! module, and ends turns. Time is fed in explicitly through [`GameEngine::tick`]
//! so pacing is testable without a clock.

mod errors;
mod turns;
mod vision;

pub use errors::TurnError;
pub use turns::{Advance, TickReport};
pub use vision::{refresh_all, refresh_field_of_view};

use tracing::warn;

use crate::action::{Action, ActionError, TurnCost};
use crate::env::{GameEnv, MessageLog, MessageTone};
use crate::error::GameError;
use crate::state::{EntityId, GameState};

/// Game engine that manages turn scheduling and action execution.
///
/// Borrowed for the duration of one host call; the state and message log are
/// owned by the session.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    messages: &'a mut dyn MessageLog,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, messages: &'a mut dyn MessageLog) -> Self {
        Self { state, messages }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Executes a player action on the player's turn. A spent turn hands
    /// control to the rotation.
    ///
    /// Refused actions with a player-facing reason are narrated before the
    /// error is returned.
    pub fn player_action(
        &mut self,
        env: &GameEnv<'_>,
        action: &Action,
    ) -> Result<TurnCost, TurnError> {
        if self.state.restoring {
            return Err(TurnError::RestoreInProgress);
        }
        if action.actor() != EntityId::PLAYER {
            return Err(TurnError::NotPlayerAction {
                actor: action.actor(),
            });
        }
        if !self.state.turn.player_turn {
            return Err(TurnError::NotPlayerTurn);
        }
        if !self.state.player_alive() {
            return Err(TurnError::PlayerDead);
        }

        let cost = match action.execute(self.state, env, self.messages) {
            Ok(cost) => cost,
            Err(error) => {
                if error.severity().is_recoverable() {
                    self.messages.post(error.to_string(), MessageTone::Muted);
                }
                return Err(error.into());
            }
        };

        if cost == TurnCost::Spent {
            self.end_turn();
        }
        Ok(cost)
    }

    /// Runs one non-player turn. Failures never stall the rotation: a policy
    /// or action error is logged and the turn is forfeited.
    fn run_npc_turn(&mut self, env: &GameEnv<'_>, actor: EntityId) -> Result<(), TurnError> {
        let action = crate::ai::decide_turn(self.state, env, self.messages, actor)?;

        if let Err(error) = action.execute(self.state, env, self.messages) {
            log_forfeit(actor, &error);
        }
        Ok(())
    }
}

fn log_forfeit(actor: EntityId, error: &ActionError) {
    warn!(
        actor = %actor,
        error = %error,
        code = error.error_code(),
        "npc action failed, turn forfeited"
    );
}
