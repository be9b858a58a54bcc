//! Action executor.
//!
//! Every change an actor makes to the world is an [`Action`]: movement and
//! melee for everyone, item handling and progression for actors that carry the
//! matching capability. Each concrete action implements [`ActionTransition`];
//! [`Action::execute`] validates and applies it and reports whether the turn
//! was spent. Ending the turn is the engine's job.

pub mod combat;
pub mod consumable;
pub mod equipment;
mod error;
pub mod inventory;
mod movement;
mod progression;
mod types;

pub use error::ActionError;
pub use progression::{LevelUpAction, LevelUpChoice};
pub use types::{
    ActivateAction, BumpAction, CancelTargetingAction, CastAction, DropAction, MeleeAction,
    MoveAction, PickUpAction, ToggleEquipAction, WaitAction,
};

use crate::env::{GameEnv, MessageLog};
use crate::state::{EntityId, GameState, Offset};

/// Whether an action used up the actor's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnCost {
    /// The turn ends and the rotation moves on.
    Spent,
    /// Nothing happened that costs a turn (menus, targeting, refused effects).
    Free,
}

/// Defines how a concrete action variant mutates game state.
pub trait ActionTransition {
    /// Returns the entity performing this action.
    fn actor(&self) -> EntityId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        messages: &mut dyn MessageLog,
    ) -> Result<TurnCost, ActionError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Move(MoveAction),
    Melee(MeleeAction),
    Bump(BumpAction),
    Wait(WaitAction),
    PickUp(PickUpAction),
    Drop(DropAction),
    Activate(ActivateAction),
    Cast(CastAction),
    ToggleEquip(ToggleEquipAction),
    CancelTargeting(CancelTargetingAction),
    LevelUp(LevelUpAction),
}

impl Action {
    pub fn wait(actor: EntityId) -> Self {
        Action::Wait(WaitAction { actor })
    }

    pub fn move_by(actor: EntityId, direction: Offset) -> Self {
        Action::Move(MoveAction { actor, direction })
    }

    pub fn melee(actor: EntityId, target: EntityId) -> Self {
        Action::Melee(MeleeAction { actor, target })
    }

    pub fn bump(actor: EntityId, direction: Offset) -> Self {
        Action::Bump(BumpAction { actor, direction })
    }

    fn transition(&self) -> &dyn ActionTransition {
        match self {
            Action::Move(action) => action,
            Action::Melee(action) => action,
            Action::Bump(action) => action,
            Action::Wait(action) => action,
            Action::PickUp(action) => action,
            Action::Drop(action) => action,
            Action::Activate(action) => action,
            Action::Cast(action) => action,
            Action::ToggleEquip(action) => action,
            Action::CancelTargeting(action) => action,
            Action::LevelUp(action) => action,
        }
    }

    pub fn actor(&self) -> EntityId {
        self.transition().actor()
    }

    /// Validates and applies the action.
    pub fn execute(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        messages: &mut dyn MessageLog,
    ) -> Result<TurnCost, ActionError> {
        let transition = self.transition();
        transition.pre_validate(state, env)?;
        transition.apply(state, env, messages)
    }
}
