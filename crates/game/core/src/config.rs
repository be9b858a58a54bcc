use std::time::Duration;

use crate::state::LevelCurve;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Pacing budget shared by every actor in the turn rotation.
    ///
    /// The per-turn delay is `base_turn_interval / actor_count`.
    pub base_turn_interval: Duration,

    /// Sight radius used when recomputing an actor's field of view.
    pub fov_radius: u32,

    /// Number of items an inventory can hold.
    pub inventory_capacity: usize,

    /// Straight-line distance (in cells) within which melee is possible.
    pub melee_range: f32,

    // ===== dungeon generation =====
    pub map_width: i32,
    pub map_height: i32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub max_rooms: usize,
    pub max_monsters_per_room: usize,
    pub max_items_per_room: usize,

    // ===== progression =====
    pub level_up_base: i32,
    pub level_up_factor: i32,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_TURN_INTERVAL: Duration = Duration::from_millis(75);
    pub const DEFAULT_FOV_RADIUS: u32 = 8;
    pub const DEFAULT_INVENTORY_CAPACITY: usize = 22;
    pub const DEFAULT_MELEE_RANGE: f32 = 1.5;

    /// Name of the template used for the player actor.
    pub const PLAYER_TEMPLATE: &'static str = "Player";

    pub fn new() -> Self {
        Self {
            base_turn_interval: Self::DEFAULT_BASE_TURN_INTERVAL,
            fov_radius: Self::DEFAULT_FOV_RADIUS,
            inventory_capacity: Self::DEFAULT_INVENTORY_CAPACITY,
            melee_range: Self::DEFAULT_MELEE_RANGE,
            map_width: 80,
            map_height: 45,
            room_min_size: 6,
            room_max_size: 10,
            max_rooms: 30,
            max_monsters_per_room: 2,
            max_items_per_room: 2,
            level_up_base: 200,
            level_up_factor: 150,
        }
    }

    pub fn with_base_turn_interval(mut self, base_turn_interval: Duration) -> Self {
        self.base_turn_interval = base_turn_interval;
        self
    }

    pub fn level_curve(&self) -> LevelCurve {
        LevelCurve {
            base: self.level_up_base,
            factor: self.level_up_factor,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
