//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::SaveTree;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// Stores the save tree as one JSON document.
///
/// Writes go to `{file}.tmp` first and are renamed over the target, so a
/// crash mid-write leaves the previous save intact.
pub struct FileSaveRepository {
    path: PathBuf,
}

impl FileSaveRepository {
    /// Creates the directory if needed. The file itself appears on first save.
    pub fn new(dir: impl AsRef<Path>, file_name: &str) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(file_name),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, tree: &SaveTree) -> Result<()> {
        let json = serde_json::to_string(tree)
            .map_err(|e| RepositoryError::Json(format!("Failed to serialize save: {}", e)))?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            floors = tree.scenes.len(),
            saved_floor = tree.saved_floor,
            "Saved game to {}",
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveTree>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)?;
        let tree: SaveTree = serde_json::from_str(&json)
            .map_err(|e| RepositoryError::Json(format!("Failed to deserialize save: {}", e)))?;

        tracing::debug!(floors = tree.scenes.len(), "Loaded game from {}", self.path.display());
        Ok(Some(tree))
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::debug!("Deleted save {}", self.path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use game_core::snapshot::{
        ActorRecord, AiSnapshot, EntityPayload, EntityRecord, GameSnapshot, ItemRecord,
        MapSnapshot, TileSnapshot,
    };
    use game_core::{FighterState, LevelState, Position, Room, SceneSnapshot};

    use super::*;

    fn record(name: &str, x: i32, y: i32, payload: EntityPayload) -> EntityRecord {
        EntityRecord {
            name: name.to_string(),
            blocks_movement: matches!(payload, EntityPayload::Actor(_)),
            visible: true,
            position: Position::new(x, y),
            payload,
        }
    }

    fn carried_by(parent: &str) -> EntityPayload {
        EntityPayload::Item(ItemRecord {
            parent: parent.to_string(),
        })
    }

    /// A floor with a levelled player wearing a dagger, a confused orc, a
    /// dead troll, loose and carried items and a bit of scenery.
    fn populated_scene(floor: u32) -> SceneSnapshot {
        let player = ActorRecord {
            alive: true,
            ai: None,
            fighter: Some(FighterState::new(30, 1, 2)),
            level: Some(LevelState {
                current_level: 2,
                current_xp: 40,
                xp_to_next_level: 350,
                level_points: 1,
            }),
        };
        let confused_orc = ActorRecord {
            alive: true,
            ai: Some(AiSnapshot::Confused {
                previous: Box::new(AiSnapshot::Pursue),
                turns_remaining: 7,
            }),
            fighter: Some(FighterState {
                max_hp: 10,
                hp: 4,
                base_defense: 0,
                base_power: 3,
            }),
            level: None,
        };
        let dead_troll = ActorRecord {
            alive: false,
            ai: Some(AiSnapshot::Pursue),
            fighter: Some(FighterState {
                max_hp: 16,
                hp: 0,
                base_defense: 1,
                base_power: 4,
            }),
            level: None,
        };

        let entities = vec![
            record("Player", 3, 3, EntityPayload::Actor(player)),
            record("Dagger (E)", 3, 3, carried_by("Player")),
            record("Health Potion", 3, 3, carried_by("Player")),
            record("Orc", 5, 4, EntityPayload::Actor(confused_orc)),
            record("Remains of Troll", 6, 2, EntityPayload::Actor(dead_troll)),
            record("Lightning Scroll", 2, 5, carried_by("")),
            record("Brazier", 1, 1, EntityPayload::Other),
        ];
        let tiles = [(3, 3, "Floor"), (6, 6, "DownStairs"), (0, 0, "Wall")]
            .into_iter()
            .map(|(x, y, name)| TileSnapshot {
                position: Position::new(x, y),
                name: name.to_string(),
                explored: x != 0,
                visible: x == 3,
            })
            .collect();

        SceneSnapshot {
            floor,
            game: GameSnapshot { entities },
            map: MapSnapshot {
                width: 8,
                height: 8,
                tiles,
                rooms: vec![Room::new(1, 1, 6, 6)],
            },
        }
    }

    fn tree() -> SaveTree {
        let mut tree = SaveTree::new();
        tree.upsert_scene(SceneSnapshot {
            floor: 1,
            game: GameSnapshot::default(),
            map: MapSnapshot::default(),
        });
        tree.upsert_scene(populated_scene(2));
        tree.saved_floor = 2;
        tree
    }

    #[test]
    fn save_then_load_returns_the_same_tree() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path(), "save.json").unwrap();

        repo.save(&tree()).unwrap();

        assert!(repo.exists());
        assert_eq!(repo.load().unwrap(), Some(tree()));
        assert!(!repo.temp_path().exists());
    }

    #[test]
    fn every_record_shape_survives_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path(), "save.json").unwrap();

        repo.save(&tree()).unwrap();
        let loaded = repo.load().unwrap().unwrap();

        let scene = loaded.scene(2).unwrap();
        let orc = &scene.game.entities[3];
        let EntityPayload::Actor(actor) = &orc.payload else {
            panic!("orc came back as {:?}", orc.payload);
        };
        assert_eq!(
            actor.ai,
            Some(AiSnapshot::Confused {
                previous: Box::new(AiSnapshot::Pursue),
                turns_remaining: 7,
            })
        );
        assert_eq!(
            scene.game.entities[1].payload,
            EntityPayload::Item(ItemRecord {
                parent: "Player".to_string()
            })
        );
        assert_eq!(scene.game.entities[6].payload, EntityPayload::Other);
        assert_eq!(loaded, tree());
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path(), "save.json").unwrap();

        assert!(!repo.exists());
        assert_eq!(repo.load().unwrap(), None);
        repo.delete().unwrap();
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path(), "save.json").unwrap();
        fs::write(repo.path(), "{ not json").unwrap();

        assert!(matches!(repo.load(), Err(RepositoryError::Json(_))));
    }

    #[test]
    fn delete_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path().join("nested"), "save.json").unwrap();
        repo.save(&tree()).unwrap();

        repo.delete().unwrap();

        assert!(!repo.exists());
    }
}
