//! Floor generation boundary.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::state::{Position, Room, TileKind};

/// Bounds handed to the generator when a new floor is fabricated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationParams {
    pub width: i32,
    pub height: i32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub max_rooms: usize,
    /// Floor number being generated; the deepest floors have no down stairs.
    pub floor: u32,
    pub seed: u64,
}

impl GenerationParams {
    pub fn from_config(config: &GameConfig, floor: u32, seed: u64) -> Self {
        Self {
            width: config.map_width,
            height: config.map_height,
            room_min_size: config.room_min_size,
            room_max_size: config.room_max_size,
            max_rooms: config.max_rooms,
            floor,
            seed,
        }
    }
}

/// Tile layout and rooms of a freshly generated floor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratedFloor {
    pub tiles: BTreeMap<Position, TileKind>,
    pub rooms: Vec<Room>,
}

impl GeneratedFloor {
    /// Where the player enters: the centre of the first room.
    pub fn entrance(&self) -> Option<Position> {
        self.rooms.first().map(Room::center)
    }
}

pub trait DungeonGenerator {
    fn generate(&self, params: &GenerationParams) -> GeneratedFloor;
}
