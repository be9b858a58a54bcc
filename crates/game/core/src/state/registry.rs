//! World registry: ordered entity and actor lists over an entity arena.
//!
//! Every live entity is owned by the arena. The *entity list* holds the ones
//! placed in the world (carried items are dormant and only referenced from an
//! inventory); the *actor list* holds the actors that take turns. The player
//! is always at index 0 of both lists and is never removed from either.
//!
//! Lookups are linear scans; a floor holds a few dozen entities at most.

use std::collections::BTreeMap;

use tracing::debug;

use super::error::RegistryError;
use super::{ActorData, Entity, EntityId, GameState, Position};

#[derive(Clone, Debug, Default)]
pub struct WorldRegistry {
    arena: BTreeMap<EntityId, Entity>,
    entities: Vec<EntityId>,
    actors: Vec<EntityId>,
    next_entity_id: u32,
}

impl WorldRegistry {
    pub fn new() -> Self {
        Self {
            arena: BTreeMap::new(),
            entities: Vec::new(),
            actors: Vec::new(),
            // 0 is reserved for the player
            next_entity_id: 1,
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.arena.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.arena.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.arena.contains_key(&id)
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorData> {
        self.get(id).and_then(Entity::as_actor)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorData> {
        self.get_mut(id).and_then(Entity::as_actor_mut)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.get(EntityId::PLAYER)
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.get_mut(EntityId::PLAYER)
    }

    /// Ordered ids of the entities placed in the world.
    pub fn entity_ids(&self) -> &[EntityId] {
        &self.entities
    }

    /// Ordered ids of the actors taking turns.
    pub fn actor_ids(&self) -> &[EntityId] {
        &self.actors
    }

    /// Entities placed in the world, in list order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().filter_map(|id| self.arena.get(id))
    }

    /// Mutable access to the entities placed in the world, in arena order.
    pub fn listed_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        let listed = &self.entities;
        self.arena
            .values_mut()
            .filter(move |entity| listed.contains(&entity.id))
    }

    pub fn is_listed(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }

    pub fn is_listed_actor(&self, id: EntityId) -> bool {
        self.actors.contains(&id)
    }

    /// First listed entity whose label or template name matches `name`.
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities()
            .find(|entity| entity.name == name || entity.label() == name)
            .map(|entity| entity.id)
    }

    /// First movement-blocking actor occupying `position`.
    pub fn actor_at_position(&self, position: Position) -> Option<EntityId> {
        self.actors
            .iter()
            .filter_map(|id| self.arena.get(id))
            .find(|entity| entity.blocks_movement && entity.position == position)
            .map(|entity| entity.id)
    }

    /// Listed, non-carried items lying on `position`.
    pub fn items_at(&self, position: Position) -> impl Iterator<Item = EntityId> + '_ {
        self.entities()
            .filter(move |entity| {
                entity.position == position
                    && entity.as_item().is_some_and(|item| !item.is_carried())
            })
            .map(|entity| entity.id)
    }

    fn allocate(&mut self, entity: &Entity) -> Result<EntityId, RegistryError> {
        if entity.is_player() {
            if self.arena.contains_key(&EntityId::PLAYER) {
                return Err(RegistryError::DuplicatePlayer);
            }
            return Ok(EntityId::PLAYER);
        }

        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self
            .next_entity_id
            .checked_add(1)
            .ok_or(RegistryError::EntityIdOverflow)?;
        Ok(id)
    }

    fn insert_index(
        list: &[EntityId],
        id: EntityId,
        index: Option<usize>,
        has_player: bool,
    ) -> Result<usize, RegistryError> {
        if id.is_player() {
            return Ok(0);
        }

        match index {
            None => Ok(list.len()),
            Some(0) if has_player => Err(RegistryError::ReservedIndex { entity: id }),
            Some(index) if index > list.len() => Err(RegistryError::IndexOutOfRange {
                index,
                len: list.len(),
            }),
            Some(index) => Ok(index),
        }
    }
}

/// Registry operations that also keep the turn rotation in step.
impl GameState {
    /// Takes ownership of a freshly instantiated entity, assigns its id and
    /// places it in the world.
    pub fn spawn(&mut self, mut entity: Entity) -> Result<EntityId, RegistryError> {
        let id = self.entities.allocate(&entity)?;
        entity.id = id;
        entity.active = false;
        self.entities.arena.insert(id, entity);
        self.add_or_insert(id, None)?;
        Ok(id)
    }

    /// Places an owned entity into the entity list (and the actor list for
    /// actors), appending or inserting at `index`. Reactivates dormant entities.
    ///
    /// The player always lands at index 0; index 0 is refused for anyone else
    /// while the player is present.
    pub fn add_or_insert(
        &mut self,
        id: EntityId,
        index: Option<usize>,
    ) -> Result<(), RegistryError> {
        let registry = &mut self.entities;
        let has_player = registry.entities.first() == Some(&EntityId::PLAYER);

        let entity = registry
            .arena
            .get_mut(&id)
            .ok_or(RegistryError::UnknownEntity(id))?;
        entity.active = true;
        let is_actor = entity.is_actor();

        if !registry.entities.contains(&id) {
            let at = WorldRegistry::insert_index(&registry.entities, id, index, has_player)?;
            registry.entities.insert(at, id);
        }

        if is_actor && !registry.actors.contains(&id) {
            let has_player_actor = registry.actors.first() == Some(&EntityId::PLAYER);
            let at = WorldRegistry::insert_index(
                &registry.actors,
                id,
                index.map(|i| i.min(registry.actors.len())),
                has_player_actor,
            )?;
            registry.actors.insert(at, id);
            self.turn.on_actor_added(id);
        }

        debug!(entity = %id, "entity added to world");
        Ok(())
    }

    /// Deactivates an entity and removes it from the entity list; actors also
    /// leave the actor list and the turn rotation. Removing the player is a
    /// no-op. The entity stays owned (dormant) and can be added back.
    pub fn remove(&mut self, id: EntityId) -> Result<(), RegistryError> {
        if id.is_player() {
            return Ok(());
        }

        let entity = self
            .entities
            .arena
            .get_mut(&id)
            .ok_or(RegistryError::UnknownEntity(id))?;
        entity.active = false;

        self.entities.entities.retain(|listed| *listed != id);
        self.retire_actor(id);

        debug!(entity = %id, "entity removed from world");
        Ok(())
    }

    /// Takes an actor out of the actor list and turn rotation while leaving it
    /// in the world, as happens to remains after death. No-op for the player.
    pub fn retire_actor(&mut self, id: EntityId) {
        if id.is_player() {
            return;
        }

        let before = self.entities.actors.len();
        self.entities.actors.retain(|listed| *listed != id);
        if self.entities.actors.len() != before {
            self.turn.on_actor_removed(id);
        }
    }

    /// Removes an entity and drops it from the arena entirely.
    pub fn destroy(&mut self, id: EntityId) -> Result<Entity, RegistryError> {
        if id.is_player() {
            return Err(RegistryError::PlayerNotRemovable);
        }
        self.remove(id)?;
        self.entities
            .arena
            .remove(&id)
            .ok_or(RegistryError::UnknownEntity(id))
    }

    /// Tears the world down.
    ///
    /// With `keep_player` the player and everything it carries survive, and
    /// both lists and the rotation shrink to the player alone. Without it the
    /// registry and rotation are emptied.
    pub fn reset_world(&mut self, keep_player: bool) {
        let registry = &mut self.entities;

        if keep_player {
            registry.arena.retain(|id, entity| {
                id.is_player()
                    || entity
                        .as_item()
                        .is_some_and(|item| item.container == Some(EntityId::PLAYER))
            });
            registry.entities.retain(|id| id.is_player());
            registry.actors.retain(|id| id.is_player());
            self.turn.retain_player();
        } else {
            registry.arena.clear();
            registry.entities.clear();
            registry.actors.clear();
            self.turn.clear();
        }

        debug!(keep_player, "world reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiPolicy;
    use crate::state::{ActorRole, FighterState, ItemData};

    fn player() -> Entity {
        Entity::actor(
            "Player",
            Position::new(1, 1),
            ActorData::new(ActorRole::Player, 8).with_fighter(FighterState::new(30, 2, 5)),
        )
    }

    fn orc(x: i32) -> Entity {
        Entity::actor(
            "Orc",
            Position::new(x, 5),
            ActorData::new(ActorRole::Npc, 8)
                .with_fighter(FighterState::new(10, 0, 3))
                .with_ai(AiPolicy::pursue()),
        )
    }

    fn assert_player_first(state: &GameState) {
        assert_eq!(state.entities.entity_ids().first(), Some(&EntityId::PLAYER));
        assert_eq!(state.entities.actor_ids().first(), Some(&EntityId::PLAYER));
    }

    #[test]
    fn player_is_inserted_first_even_when_spawned_late() {
        let mut state = GameState::empty();
        let orc = state.spawn(orc(3)).unwrap();
        state.spawn(player()).unwrap();

        assert_player_first(&state);
        assert_eq!(state.entities.actor_ids(), &[EntityId::PLAYER, orc]);
    }

    #[test]
    fn index_zero_is_reserved_for_the_player() {
        let mut state = GameState::empty();
        state.spawn(player()).unwrap();
        let orc = state.spawn(orc(3)).unwrap();
        state.remove(orc).unwrap();

        let result = state.add_or_insert(orc, Some(0));

        assert_eq!(result, Err(RegistryError::ReservedIndex { entity: orc }));
        assert_player_first(&state);
    }

    #[test]
    fn removing_the_player_is_a_noop() {
        let mut state = GameState::empty();
        state.spawn(player()).unwrap();
        state.spawn(orc(3)).unwrap();
        state
            .entities
            .actor_mut(EntityId::PLAYER)
            .unwrap()
            .alive = false;

        state.remove(EntityId::PLAYER).unwrap();

        assert_player_first(&state);
        assert!(state.turn.contains(EntityId::PLAYER));
    }

    #[test]
    fn invariants_hold_across_add_remove_sequences() {
        let mut state = GameState::empty();
        state.spawn(player()).unwrap();
        let ids: Vec<_> = (0..6).map(|x| state.spawn(orc(x)).unwrap()).collect();

        for (step, id) in ids.iter().enumerate() {
            if step % 2 == 0 {
                state.remove(*id).unwrap();
            } else {
                state.remove(*id).unwrap();
                state.add_or_insert(*id, Some(1)).unwrap();
            }
            assert_player_first(&state);
            assert_eq!(state.turn.len(), state.entities.actor_ids().len());
            assert_eq!(
                state.turn.delay,
                state.turn.base_interval / state.entities.actor_ids().len() as u32
            );
        }
    }

    #[test]
    fn removed_actor_leaves_rotation() {
        let mut state = GameState::empty();
        state.spawn(player()).unwrap();
        let orc = state.spawn(orc(3)).unwrap();

        state.remove(orc).unwrap();

        assert!(!state.turn.contains(orc));
        assert!(!state.entities.get(orc).unwrap().active);
        assert!(state.entities.actor_at_position(Position::new(3, 5)).is_none());
    }

    #[test]
    fn actor_lookup_ignores_non_blocking_actors() {
        let mut state = GameState::empty();
        state.spawn(player()).unwrap();
        let orc = state.spawn(orc(3)).unwrap();
        let position = Position::new(3, 5);

        assert_eq!(state.entities.actor_at_position(position), Some(orc));

        state.entities.get_mut(orc).unwrap().blocks_movement = false;
        assert_eq!(state.entities.actor_at_position(position), None);
    }

    #[test]
    fn reset_keeping_player_retains_carried_items() {
        let mut state = GameState::empty();
        state.spawn(player()).unwrap();
        state.spawn(orc(3)).unwrap();
        let potion = state
            .spawn(Entity::item("Health Potion", Position::new(1, 1), ItemData::default()))
            .unwrap();
        state.entities.get_mut(potion).unwrap().as_item_mut().unwrap().container =
            Some(EntityId::PLAYER);
        state.remove(potion).unwrap();
        let floor_potion = state
            .spawn(Entity::item("Health Potion", Position::new(2, 2), ItemData::default()))
            .unwrap();

        state.reset_world(true);

        assert!(state.entities.contains(potion));
        assert!(!state.entities.contains(floor_potion));
        assert_eq!(state.entities.entity_ids(), &[EntityId::PLAYER]);
        assert_eq!(state.turn.rotation.len(), 1);
    }
}
