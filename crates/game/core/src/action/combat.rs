//! Melee resolution, damage, death and experience.

use tracing::{debug, info};

use super::ActionError;
use crate::config::GameConfig;
use crate::env::{MessageLog, MessageTone};
use crate::state::{EntityId, GameState};

/// Resolves a melee hit: damage is the attacker's power minus the target's
/// defense, equipment included.
pub fn melee(
    state: &mut GameState,
    config: &GameConfig,
    messages: &mut dyn MessageLog,
    attacker: EntityId,
    target: EntityId,
) -> Result<(), ActionError> {
    let attacker_name = state
        .entities
        .get(attacker)
        .map(|entity| entity.label())
        .ok_or(ActionError::ActorNotFound(attacker))?;
    let target_name = state
        .entities
        .get(target)
        .map(|entity| entity.label())
        .ok_or(ActionError::InvalidTarget(target))?;

    let damage = state.power(attacker) - state.defense(target);
    let tone = if attacker.is_player() {
        MessageTone::Neutral
    } else {
        MessageTone::Danger
    };
    let description = format!("{attacker_name} attacks {target_name}");

    if damage > 0 {
        messages.post(format!("{description} for {damage} hit points."), tone);
        apply_damage(state, config, messages, target, damage);
    } else {
        messages.post(format!("{description} but does no damage."), tone);
    }
    Ok(())
}

/// Subtracts hit points from an actor.
pub fn apply_damage(
    state: &mut GameState,
    config: &GameConfig,
    messages: &mut dyn MessageLog,
    target: EntityId,
    amount: i32,
) {
    let Some(hp) = state
        .entities
        .actor(target)
        .and_then(|data| data.fighter.as_ref())
        .map(|fighter| fighter.hp())
    else {
        return;
    };
    set_hp(state, config, messages, target, hp - amount);
}

/// Sets hit points, clamped to `[0, max_hp]`; reaching zero kills the actor.
pub fn set_hp(
    state: &mut GameState,
    config: &GameConfig,
    messages: &mut dyn MessageLog,
    target: EntityId,
    value: i32,
) {
    let reached_zero = state
        .entities
        .actor_mut(target)
        .and_then(|data| data.fighter.as_mut())
        .is_some_and(|fighter| fighter.set_hp(value));

    if reached_zero {
        die(state, config, messages, target);
    }
}

/// Death transition. Only the first call on a living actor has any effect.
///
/// The player is flagged dead and stays in the rotation. Anyone else hands
/// its experience to the player, stops blocking, and is retired from the
/// actor list while its remains stay in the world.
pub fn die(
    state: &mut GameState,
    config: &GameConfig,
    messages: &mut dyn MessageLog,
    target: EntityId,
) {
    let Some(entity) = state.entities.get(target) else {
        return;
    };
    let Some(data) = entity.as_actor() else {
        return;
    };
    if !data.alive {
        return;
    }

    let name = entity.name.clone();
    let xp_given = data.level.map_or(0, |level| level.xp_given);

    if target.is_player() {
        messages.post("You died!".to_string(), MessageTone::Danger);
        info!("player died");
    } else {
        grant_experience(state, config, messages, EntityId::PLAYER, xp_given);
        messages.post(format!("{name} is dead!"), MessageTone::Notice);
        debug!(entity = %target, name, "actor died");
    }

    if let Some(entity) = state.entities.get_mut(target) {
        entity.blocks_movement = false;
        if let Some(data) = entity.as_actor_mut() {
            data.alive = false;
            if let Some(fighter) = data.fighter.as_mut() {
                fighter.target = None;
            }
        }
    }

    state.retire_actor(target);
}

/// Adds experience to an actor with a level component.
pub fn grant_experience(
    state: &mut GameState,
    config: &GameConfig,
    messages: &mut dyn MessageLog,
    actor: EntityId,
    xp: i32,
) {
    if xp <= 0 {
        return;
    }
    let Some(level) = state
        .entities
        .actor_mut(actor)
        .and_then(|data| data.level.as_mut())
    else {
        return;
    };

    messages.post(
        format!("You gain {xp} experience points."),
        MessageTone::Neutral,
    );
    if level.state.add_experience(xp, config.level_curve()) {
        let current = level.state.current_level;
        messages.post(format!("You advance to level {current}!"), MessageTone::Good);
        info!(level = current, "player levelled up");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiPolicy;
    use crate::env::Message;
    use crate::state::{
        ActorData, ActorRole, Entity, Equippable, FighterState, ItemData, Level, LevelState,
        Position,
    };

    fn with_player() -> GameState {
        let config = GameConfig::default();
        let mut state = GameState::empty();
        state
            .spawn(Entity::actor(
                "Player",
                Position::new(0, 0),
                ActorData::new(ActorRole::Player, 8)
                    .with_fighter(FighterState::new(30, 2, 5))
                    .with_level(Level::new(LevelState::new(config.level_curve()), 0))
                    .with_inventory(4)
                    .with_equipment(),
            ))
            .unwrap();
        state
    }

    fn spawn_orc(state: &mut GameState, hp: i32) -> EntityId {
        state
            .spawn(Entity::actor(
                "Orc",
                Position::new(1, 0),
                ActorData::new(ActorRole::Npc, 8)
                    .with_fighter(FighterState::new(hp, 0, 3))
                    .with_level(Level::new(LevelState::default(), 35))
                    .with_ai(AiPolicy::pursue()),
            ))
            .unwrap()
    }

    #[test]
    fn overkill_clamps_and_dies_once() {
        let config = GameConfig::default();
        let mut state = with_player();
        let orc = spawn_orc(&mut state, 10);
        let mut messages: Vec<Message> = Vec::new();

        apply_damage(&mut state, &config, &mut messages, orc, 12);
        apply_damage(&mut state, &config, &mut messages, orc, 12);

        let data = state.entities.actor(orc).unwrap();
        assert_eq!(data.fighter.as_ref().unwrap().hp(), 0);
        assert!(!data.alive);
        let deaths = messages.iter().filter(|m| m.text == "Orc is dead!").count();
        assert_eq!(deaths, 1);
    }

    #[test]
    fn dead_npc_leaves_rotation_but_stays_in_world() {
        let config = GameConfig::default();
        let mut state = with_player();
        let orc = spawn_orc(&mut state, 10);
        let mut messages: Vec<Message> = Vec::new();

        apply_damage(&mut state, &config, &mut messages, orc, 10);

        assert!(state.entities.is_listed(orc));
        assert!(!state.entities.is_listed_actor(orc));
        assert!(!state.turn.contains(orc));
        assert_eq!(state.entities.get(orc).unwrap().label(), "Remains of Orc");
        assert_eq!(state.entities.actor_at_position(Position::new(1, 0)), None);
        let player_level = state.entities.actor(EntityId::PLAYER).unwrap().level.unwrap();
        assert_eq!(player_level.state.current_xp, 35);
    }

    #[test]
    fn player_death_is_only_a_flag() {
        let config = GameConfig::default();
        let mut state = with_player();
        let mut messages: Vec<Message> = Vec::new();

        apply_damage(&mut state, &config, &mut messages, EntityId::PLAYER, 100);

        assert!(!state.player_alive());
        assert_eq!(state.entities.actor_ids().first(), Some(&EntityId::PLAYER));
        assert!(state.turn.contains(EntityId::PLAYER));
        assert_eq!(messages.last().unwrap().text, "You died!");
    }

    #[test]
    fn equipment_bonuses_feed_melee_damage() {
        let config = GameConfig::default();
        let mut state = with_player();
        let orc = spawn_orc(&mut state, 20);
        let sword = state
            .spawn(Entity::item(
                "Sword",
                Position::new(0, 0),
                ItemData::equippable(Equippable::weapon(4)),
            ))
            .unwrap();
        state.entities.actor_mut(EntityId::PLAYER).unwrap().equipment.as_mut().unwrap().weapon =
            Some(sword);
        let mut messages: Vec<Message> = Vec::new();

        melee(&mut state, &config, &mut messages, EntityId::PLAYER, orc).unwrap();

        assert_eq!(state.entities.actor(orc).unwrap().fighter.as_ref().unwrap().hp(), 11);
    }

    #[test]
    fn zero_damage_is_reported() {
        let config = GameConfig::default();
        let mut state = with_player();
        let orc = spawn_orc(&mut state, 10);
        state.entities.actor_mut(orc).unwrap().fighter.as_mut().unwrap().state.base_defense = 9;
        let mut messages: Vec<Message> = Vec::new();

        melee(&mut state, &config, &mut messages, EntityId::PLAYER, orc).unwrap();

        assert_eq!(messages[0].text, "Player attacks Orc but does no damage.");
    }
}
