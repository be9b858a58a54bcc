//! Per-floor map memory: tile kinds, exploration flags and generated rooms.

use std::collections::{BTreeMap, BTreeSet};

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::Position;

/// Known tile kinds. The string form is the tile name stored in snapshots.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum TileKind {
    #[strum(serialize = "Floor")]
    Floor,
    #[strum(serialize = "Wall")]
    Wall,
    #[strum(serialize = "UpStairs")]
    UpStairs,
    #[strum(serialize = "DownStairs")]
    DownStairs,
}

impl TileKind {
    /// Walls live on the obstacle layer, everything else on the floor layer.
    pub fn is_walkable(self) -> bool {
        !matches!(self, TileKind::Wall)
    }

    pub fn is_transparent(self) -> bool {
        self.is_walkable()
    }
}

/// Fog overlay shade of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FogShade {
    /// Currently visible.
    Clear,
    /// Explored but out of sight.
    Dim,
    /// Never seen.
    Opaque,
}

/// Memory of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRecord {
    pub kind: TileKind,
    pub explored: bool,
    pub visible: bool,
}

impl TileRecord {
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            explored: false,
            visible: false,
        }
    }

    pub fn fog(&self) -> FogShade {
        if self.visible {
            FogShade::Clear
        } else if self.explored {
            FogShade::Dim
        } else {
            FogShade::Opaque
        }
    }
}

/// Axis-aligned room rectangle produced by dungeon generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Cells strictly inside the walls.
    pub fn inner(&self) -> impl Iterator<Item = Position> + '_ {
        ((self.x + 1)..(self.x + self.width - 1))
            .flat_map(move |x| ((self.y + 1)..(self.y + self.height - 1)).map(move |y| Position::new(x, y)))
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x > self.x
            && position.x < self.x + self.width - 1
            && position.y > self.y
            && position.y < self.y + self.height - 1
    }

    pub fn intersects(&self, other: &Room) -> bool {
        self.x <= other.x + other.width
            && self.x + self.width >= other.x
            && self.y <= other.y + other.height
            && self.y + self.height >= other.y
    }
}

/// Tile memory of the floor currently loaded.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MapMemory {
    pub width: i32,
    pub height: i32,
    pub tiles: BTreeMap<Position, TileRecord>,
    pub rooms: Vec<Room>,
    /// Cells lit by the player's last field-of-view refresh.
    pub visible: BTreeSet<Position>,
}

impl MapMemory {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }

    pub fn tile(&self, position: Position) -> Option<&TileRecord> {
        self.tiles.get(&position)
    }

    pub fn set_tile(&mut self, position: Position, kind: TileKind) {
        self.tiles.insert(position, TileRecord::new(kind));
    }

    /// In bounds, has a tile, and the tile is not a wall.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.in_bounds(position) && self.tile(position).is_some_and(|tile| tile.kind.is_walkable())
    }

    pub fn is_transparent(&self, position: Position) -> bool {
        self.tile(position).is_some_and(|tile| tile.kind.is_transparent())
    }

    pub fn fog(&self, position: Position) -> FogShade {
        self.tile(position).map_or(FogShade::Opaque, TileRecord::fog)
    }

    pub fn find(&self, kind: TileKind) -> Option<Position> {
        self.tiles
            .iter()
            .find(|(_, tile)| tile.kind == kind)
            .map(|(position, _)| *position)
    }

    /// Applies the player's fresh field of view: previously visible cells become
    /// explored and dim, the new cells become visible.
    pub fn update_visibility(&mut self, field_of_view: &BTreeSet<Position>) {
        for position in std::mem::take(&mut self.visible) {
            if let Some(tile) = self.tiles.get_mut(&position) {
                tile.explored = true;
                tile.visible = false;
            }
        }

        for position in field_of_view {
            if let Some(tile) = self.tiles.get_mut(position) {
                tile.visible = true;
                self.visible.insert(*position);
            }
        }
    }

    /// Drops live visibility tracking without touching exploration.
    pub fn clear_visible(&mut self) {
        for position in std::mem::take(&mut self.visible) {
            if let Some(tile) = self.tiles.get_mut(&position) {
                tile.visible = false;
            }
        }
    }
}
