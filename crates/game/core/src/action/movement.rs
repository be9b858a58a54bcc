use tracing::trace;

use super::{
    ActionError, ActionTransition, BumpAction, MeleeAction, MoveAction, TurnCost, WaitAction,
    combat,
};
use crate::engine::refresh_field_of_view;
use crate::env::{GameEnv, MessageLog};
use crate::state::{EntityId, GameState};

fn require_listed(state: &GameState, actor: EntityId) -> Result<(), ActionError> {
    if state.entities.is_listed(actor) {
        Ok(())
    } else {
        Err(ActionError::ActorNotFound(actor))
    }
}

impl ActionTransition for MoveAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        env.fov()?;
        require_listed(state, self.actor)
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        _messages: &mut dyn MessageLog,
    ) -> Result<TurnCost, ActionError> {
        let origin = state
            .entities
            .get(self.actor)
            .map(|entity| entity.position)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let destination = origin.offset(self.direction);

        if self.direction.is_zero() || !state.can_enter(destination) {
            trace!(actor = %self.actor, %destination, "move blocked, turn wasted");
            return Ok(TurnCost::Spent);
        }

        if let Some(entity) = state.entities.get_mut(self.actor) {
            entity.position = destination;
        }
        refresh_field_of_view(state, env.fov()?, self.actor);
        Ok(TurnCost::Spent)
    }
}

impl ActionTransition for MeleeAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        require_listed(state, self.actor)?;
        let target = state
            .entities
            .actor(self.target)
            .ok_or(ActionError::InvalidTarget(self.target))?;
        if target.fighter.is_none() {
            return Err(ActionError::InvalidTarget(self.target));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        messages: &mut dyn MessageLog,
    ) -> Result<TurnCost, ActionError> {
        combat::melee(state, env.config(), messages, self.actor, self.target)?;
        Ok(TurnCost::Spent)
    }
}

impl ActionTransition for BumpAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), ActionError> {
        env.fov()?;
        require_listed(state, self.actor)
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        messages: &mut dyn MessageLog,
    ) -> Result<TurnCost, ActionError> {
        let origin = state
            .entities
            .get(self.actor)
            .map(|entity| entity.position)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let destination = origin.offset(self.direction);

        match state.entities.actor_at_position(destination) {
            Some(occupant) if occupant != self.actor => {
                let melee = MeleeAction {
                    actor: self.actor,
                    target: occupant,
                };
                melee.pre_validate(state, env)?;
                melee.apply(state, env, messages)
            }
            _ => MoveAction {
                actor: self.actor,
                direction: self.direction,
            }
            .apply(state, env, messages),
        }
    }
}

impl ActionTransition for WaitAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(
        &self,
        _state: &mut GameState,
        _env: &GameEnv<'_>,
        _messages: &mut dyn MessageLog,
    ) -> Result<TurnCost, ActionError> {
        Ok(TurnCost::Spent)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::action::Action;
    use crate::ai::AiPolicy;
    use crate::config::GameConfig;
    use crate::env::{FieldOfView, Message};
    use crate::state::{
        ActorData, ActorRole, Entity, FighterState, MapMemory, Offset, Position, TileKind,
    };

    struct Adjacent;

    impl FieldOfView for Adjacent {
        fn compute(&self, _: &MapMemory, origin: Position, _: u32) -> BTreeSet<Position> {
            Offset::NEIGHBORS
                .iter()
                .map(|offset| origin.offset(*offset))
                .chain([origin])
                .collect()
        }
    }

    fn corridor() -> GameState {
        let mut state = GameState::empty();
        state.map = MapMemory::new(5, 3);
        for x in 0..5 {
            for y in 0..3 {
                let kind = if y == 1 && x > 0 && x < 4 {
                    TileKind::Floor
                } else {
                    TileKind::Wall
                };
                state.map.set_tile(Position::new(x, y), kind);
            }
        }
        state
            .spawn(Entity::actor(
                "Player",
                Position::new(1, 1),
                ActorData::new(ActorRole::Player, 8).with_fighter(FighterState::new(30, 2, 5)),
            ))
            .unwrap();
        state
    }

    fn run(state: &mut GameState, action: Action) -> (TurnCost, Vec<Message>) {
        let config = GameConfig::default();
        let env = GameEnv::new(&config).with_fov(&Adjacent);
        let mut messages = Vec::new();
        let cost = action.execute(state, &env, &mut messages).unwrap();
        (cost, messages)
    }

    #[test]
    fn move_updates_position_and_player_vision() {
        let mut state = corridor();

        run(&mut state, Action::move_by(EntityId::PLAYER, Offset::new(1, 0)));

        assert_eq!(state.player().unwrap().position, Position::new(2, 1));
        assert!(state.map.tile(Position::new(3, 1)).unwrap().visible);
    }

    #[test]
    fn bumping_a_wall_wastes_the_turn() {
        let mut state = corridor();

        let (cost, messages) = run(&mut state, Action::bump(EntityId::PLAYER, Offset::new(0, 1)));

        assert_eq!(cost, TurnCost::Spent);
        assert!(messages.is_empty());
        assert_eq!(state.player().unwrap().position, Position::new(1, 1));
    }

    #[test]
    fn bumping_an_actor_attacks_it() {
        let mut state = corridor();
        let orc = state
            .spawn(Entity::actor(
                "Orc",
                Position::new(2, 1),
                ActorData::new(ActorRole::Npc, 8)
                    .with_fighter(FighterState::new(10, 0, 3))
                    .with_ai(AiPolicy::pursue()),
            ))
            .unwrap();

        let (_, messages) = run(&mut state, Action::bump(EntityId::PLAYER, Offset::new(1, 0)));

        assert_eq!(state.entities.actor(orc).unwrap().fighter.as_ref().unwrap().hp(), 5);
        assert_eq!(messages[0].text, "Player attacks Orc for 5 hit points.");
        assert_eq!(state.player().unwrap().position, Position::new(1, 1));
    }
}
