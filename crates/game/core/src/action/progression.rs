use super::{ActionError, ActionTransition, TurnCost};
use crate::env::{GameEnv, MessageLog, MessageTone};
use crate::state::{EntityId, GameState};

/// Stat raised by spending one level point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelUpChoice {
    MaxHp,
    Power,
    Defense,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUpAction {
    pub actor: EntityId,
    pub choice: LevelUpChoice,
}

impl LevelUpAction {
    const MAX_HP_STEP: i32 = 10;
    const POWER_STEP: i32 = 1;
    const DEFENSE_STEP: i32 = 1;
}

impl ActionTransition for LevelUpAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        let data = state
            .entities
            .actor(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        if data.fighter.is_none() {
            return Err(ActionError::MissingCapability {
                actor: self.actor,
                capability: "fighter",
            });
        }
        match data.level {
            Some(level) if level.state.level_points > 0 => Ok(()),
            Some(_) => Err(ActionError::NoLevelPoints),
            None => Err(ActionError::MissingCapability {
                actor: self.actor,
                capability: "level",
            }),
        }
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &GameEnv<'_>,
        messages: &mut dyn MessageLog,
    ) -> Result<TurnCost, ActionError> {
        let data = state
            .entities
            .actor_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let (Some(fighter), Some(level)) = (data.fighter.as_mut(), data.level.as_mut()) else {
            return Err(ActionError::MissingCapability {
                actor: self.actor,
                capability: "level",
            });
        };

        let text = match self.choice {
            LevelUpChoice::MaxHp => {
                fighter.state.max_hp += Self::MAX_HP_STEP;
                fighter.set_hp(fighter.hp() + Self::MAX_HP_STEP);
                "Your health improves!"
            }
            LevelUpChoice::Power => {
                fighter.state.base_power += Self::POWER_STEP;
                "You feel stronger!"
            }
            LevelUpChoice::Defense => {
                fighter.state.base_defense += Self::DEFENSE_STEP;
                "Your movements are getting swifter!"
            }
        };
        level.state.level_points -= 1;

        messages.post(text.to_string(), MessageTone::Good);
        Ok(TurnCost::Free)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::config::GameConfig;
    use crate::env::Message;
    use crate::state::{ActorData, ActorRole, Entity, FighterState, Level, LevelState, Position};

    fn player(points: i32) -> GameState {
        let mut state = GameState::empty();
        let mut level = LevelState::new(GameConfig::default().level_curve());
        level.level_points = points;
        state
            .spawn(Entity::actor(
                "Player",
                Position::new(0, 0),
                ActorData::new(ActorRole::Player, 8)
                    .with_fighter(FighterState::new(30, 2, 5))
                    .with_level(Level::new(level, 0)),
            ))
            .unwrap();
        state
    }

    fn level_up(state: &mut GameState, choice: LevelUpChoice) -> Result<TurnCost, ActionError> {
        let config = GameConfig::default();
        let env = GameEnv::new(&config);
        let mut messages: Vec<Message> = Vec::new();
        Action::LevelUp(LevelUpAction {
            actor: EntityId::PLAYER,
            choice,
        })
        .execute(state, &env, &mut messages)
    }

    #[test]
    fn max_hp_raises_both_hp_values() {
        let mut state = player(1);

        level_up(&mut state, LevelUpChoice::MaxHp).unwrap();

        let fighter = state.entities.actor(EntityId::PLAYER).unwrap().fighter.clone().unwrap();
        assert_eq!((fighter.hp(), fighter.max_hp()), (40, 40));
    }

    #[test]
    fn spending_requires_points() {
        let mut state = player(1);

        level_up(&mut state, LevelUpChoice::Power).unwrap();

        assert_eq!(
            level_up(&mut state, LevelUpChoice::Defense),
            Err(ActionError::NoLevelPoints)
        );
        assert_eq!(state.power(EntityId::PLAYER), 6);
    }
}
