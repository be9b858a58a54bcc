//! Authoritative game state representation.
//!
//! This module owns the world registry, turn rotation and map memory of the
//! floor currently loaded. Runtime layers query this state but mutate it
//! through the engine, the snapshot restorer or the registry operations.
pub mod error;
pub mod registry;
pub mod types;

pub use error::RegistryError;
pub use registry::WorldRegistry;
pub use types::{
    ActorData, ActorRole, Consumable, EQUIPPED_SUFFIX, Entity, EntityId, EntityKind, Equipment,
    EquipmentSlot, Equippable, Fighter, FighterState, FogShade, Inventory, ItemData, Level,
    LevelCurve, LevelState, MapMemory, Offset, Position, REMAINS_PREFIX, Room, Targeting,
    TileKind, TileRecord, TurnState, is_equipped_label, template_name,
};

use crate::config::GameConfig;

/// Live state of one session.
#[derive(Clone, Debug)]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified.
    /// Combined with `nonce` to derive a unique seed for each random event.
    pub game_seed: u64,

    /// Counts completed turns; advances every time the rotation moves.
    pub nonce: u64,

    /// Floor currently loaded (1-based).
    pub floor: u32,

    pub entities: WorldRegistry,
    pub turn: TurnState,
    pub map: MapMemory,

    /// Set while a restore job is replaying a snapshot. Input and turns are
    /// refused until it clears.
    pub restoring: bool,
}

impl GameState {
    pub fn new(game_seed: u64, config: &GameConfig) -> Self {
        Self {
            game_seed,
            nonce: 0,
            floor: 1,
            entities: WorldRegistry::new(),
            turn: TurnState::new(config.base_turn_interval),
            map: MapMemory::new(config.map_width, config.map_height),
            restoring: false,
        }
    }

    /// Creates an empty state with default pacing and no map.
    pub fn empty() -> Self {
        Self {
            game_seed: 0,
            nonce: 0,
            floor: 1,
            entities: WorldRegistry::new(),
            turn: TurnState::default(),
            map: MapMemory::default(),
            restoring: false,
        }
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entities.player()
    }

    pub fn player_alive(&self) -> bool {
        self.entities
            .actor(EntityId::PLAYER)
            .is_some_and(|actor| actor.alive)
    }

    /// Whether a move onto `position` is allowed: walkable tile, no blocking actor.
    pub fn can_enter(&self, position: Position) -> bool {
        self.map.is_walkable(position) && self.entities.actor_at_position(position).is_none()
    }

    /// Power including equipment bonuses.
    pub fn power(&self, id: EntityId) -> i32 {
        self.combat_total(id, |fighter| fighter.state.base_power, |bonus| bonus.power_bonus)
    }

    /// Defense including equipment bonuses.
    pub fn defense(&self, id: EntityId) -> i32 {
        self.combat_total(id, |fighter| fighter.state.base_defense, |bonus| {
            bonus.defense_bonus
        })
    }

    fn combat_total(
        &self,
        id: EntityId,
        base: impl Fn(&Fighter) -> i32,
        bonus: impl Fn(&Equippable) -> i32,
    ) -> i32 {
        let Some(actor) = self.entities.actor(id) else {
            return 0;
        };
        let base = actor.fighter.as_ref().map_or(0, base);
        let bonuses: i32 = actor
            .equipment
            .iter()
            .flat_map(|equipment| equipment.equipped())
            .filter_map(|item| self.entities.get(item))
            .filter_map(|entity| entity.as_item()?.equippable.as_ref())
            .map(&bonus)
            .sum();
        base + bonuses
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::empty()
    }
}
