//! Serializable world snapshots and the per-floor save tree.
//!
//! A [`SceneSnapshot`] pairs the ordered entity records of one floor with its
//! map memory. Snapshots are plain values: nothing in them aliases live state,
//! so a restored floor never shares memory with one visited earlier.

mod capture;
mod error;
mod restore;

pub use capture::{capture_game, capture_map, capture_scene};
pub use error::SnapshotError;
pub use restore::{RestoreJob, RestoreProgress};

use tracing::debug;

use crate::ai::{AiKind, AiPolicy};
use crate::state::{FighterState, LevelState, Position, Room};

/// Every floor visited so far, addressed by floor number.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveTree {
    /// Floor the player was on when the tree was last saved.
    pub saved_floor: u32,
    pub scenes: Vec<SceneSnapshot>,
}

impl SaveTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self, floor: u32) -> Option<&SceneSnapshot> {
        self.scenes.iter().find(|scene| scene.floor == floor)
    }

    /// Like [`SaveTree::scene`], but a missing floor is an error.
    pub fn require_scene(&self, floor: u32) -> Result<&SceneSnapshot, SnapshotError> {
        self.scene(floor).ok_or(SnapshotError::MissingScene { floor })
    }

    /// Overwrites the scene for the same floor in place, or appends it.
    pub fn upsert_scene(&mut self, scene: SceneSnapshot) {
        match self.scenes.iter_mut().find(|existing| existing.floor == scene.floor) {
            Some(existing) => {
                debug!(floor = scene.floor, "save slot overwritten");
                *existing = scene;
            }
            None => {
                debug!(floor = scene.floor, "save slot appended");
                self.scenes.push(scene);
            }
        }
    }
}

/// One floor: its entities and its map memory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneSnapshot {
    pub floor: u32,
    pub game: GameSnapshot,
    pub map: MapSnapshot,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub entities: Vec<EntityRecord>,
}

/// Saved state of one entity.
///
/// `name` is the display label: `"Remains of X"` for a dead actor and
/// `"X (E)"` for an equipped item. Restoring strips the markers to find the
/// template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityRecord {
    pub name: String,
    pub blocks_movement: bool,
    pub visible: bool,
    pub position: Position,
    pub payload: EntityPayload,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum EntityPayload {
    Actor(ActorRecord),
    Item(ItemRecord),
    Other,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorRecord {
    pub alive: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai: Option<AiSnapshot>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fighter: Option<FighterState>,
    /// Only the player's progression is persisted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: Option<LevelState>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRecord {
    /// Name of the entity holding the item; empty when it lies on the floor.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: String,
}

/// Persistent part of a policy: its tag, the wrapped policy and the countdown.
/// The pursue engagement latch is transient.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum AiSnapshot {
    Pursue,
    Confused {
        previous: Box<AiSnapshot>,
        turns_remaining: i32,
    },
}

impl AiSnapshot {
    pub fn kind(&self) -> AiKind {
        match self {
            AiSnapshot::Pursue => AiKind::Pursue,
            AiSnapshot::Confused { .. } => AiKind::Confused,
        }
    }

    /// Rebuilds a live policy. A pursuer comes back as the default, not yet
    /// engaged policy.
    pub fn restore(&self) -> AiPolicy {
        match self {
            AiSnapshot::Pursue => AiPolicy::pursue(),
            AiSnapshot::Confused {
                previous,
                turns_remaining,
            } => AiPolicy::confused(previous.restore(), *turns_remaining),
        }
    }
}

impl From<&AiPolicy> for AiSnapshot {
    fn from(policy: &AiPolicy) -> Self {
        match policy {
            AiPolicy::Pursue(_) => AiSnapshot::Pursue,
            AiPolicy::Confused(state) => AiSnapshot::Confused {
                previous: Box::new(AiSnapshot::from(state.previous.as_ref())),
                turns_remaining: state.turns_remaining,
            },
        }
    }
}

/// Map memory by value. Tiles are a list because positions are not string keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSnapshot {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<TileSnapshot>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rooms: Vec<Room>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileSnapshot {
    pub position: Position,
    /// Tile kind name, e.g. `"Floor"` or `"DownStairs"`.
    pub name: String,
    pub explored: bool,
    pub visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(floor: u32, entities: usize) -> SceneSnapshot {
        let record = EntityRecord {
            name: "Orc".to_string(),
            blocks_movement: true,
            visible: false,
            position: Position::new(1, 1),
            payload: EntityPayload::Other,
        };
        SceneSnapshot {
            floor,
            game: GameSnapshot {
                entities: vec![record; entities],
            },
            map: MapSnapshot::default(),
        }
    }

    #[test]
    fn saving_the_same_floor_twice_overwrites_its_slot() {
        let mut tree = SaveTree::new();
        tree.upsert_scene(scene(1, 1));
        tree.upsert_scene(scene(2, 1));

        tree.upsert_scene(scene(2, 3));
        tree.upsert_scene(scene(2, 4));

        assert_eq!(tree.scenes.len(), 2);
        assert_eq!(tree.scene(2).unwrap().game.entities.len(), 4);
        assert_eq!(tree.scenes[1].floor, 2);
    }

    #[test]
    fn missing_floor_is_reported() {
        let tree = SaveTree::new();
        assert_eq!(
            tree.require_scene(3).unwrap_err(),
            SnapshotError::MissingScene { floor: 3 }
        );
    }

    #[test]
    fn nested_policy_round_trips_through_its_tag() {
        let policy = AiPolicy::confused(AiPolicy::confused(AiPolicy::pursue(), 2), 5);

        let snapshot = AiSnapshot::from(&policy);

        assert_eq!(snapshot.kind(), AiKind::Confused);
        assert_eq!(snapshot.restore(), policy);
    }
}
