//! Content factory for building the template registry from data files.

use std::path::PathBuf;

use game_core::GameConfig;

use crate::TemplateCatalog;
use crate::loaders::{ConfigLoader, LoadResult, TemplateLoader};

/// Catalog shipped with the crate.
const BUILTIN_TEMPLATES: &str = include_str!("../../data/templates.ron");

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// └── templates.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loads `config.toml`, or the defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(GameConfig::default())
        }
    }

    /// Loads `templates.ron`.
    pub fn load_catalog(&self, config: &GameConfig) -> LoadResult<TemplateCatalog> {
        TemplateLoader::load(&self.data_dir.join("templates.ron"), config)
    }

    /// The catalog compiled into the crate.
    pub fn builtin(config: &GameConfig) -> LoadResult<TemplateCatalog> {
        TemplateLoader::parse(BUILTIN_TEMPLATES, config)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{EquipmentSlot, Position, TemplateRegistry};

    use super::*;

    #[test]
    fn builtin_catalog_is_complete() {
        let catalog = ContentFactory::builtin(&GameConfig::default()).unwrap();

        for name in [
            "Player",
            "Orc",
            "Troll",
            "Health Potion",
            "Lightning Scroll",
            "Fireball Scroll",
            "Confusion Scroll",
            "Dagger",
            "Sword",
            "Leather Armor",
            "Chain Mail",
        ] {
            assert!(catalog.contains(name), "{name} missing");
        }
        assert!(catalog.dangling_spawns().is_empty());
    }

    #[test]
    fn builtin_player_carries_and_equips() {
        let catalog = ContentFactory::builtin(&GameConfig::default()).unwrap();

        let player = catalog.instantiate("Player", Position::ORIGIN).unwrap();
        let data = player.as_actor().unwrap();

        assert!(player.is_player());
        assert!(data.ai.is_none());
        assert_eq!(data.inventory.as_ref().unwrap().capacity, 22);
        assert!(data.equipment.is_some());
    }

    #[test]
    fn builtin_armor_goes_in_the_armor_slot() {
        let catalog = ContentFactory::builtin(&GameConfig::default()).unwrap();

        let mail = catalog.instantiate("Chain Mail", Position::ORIGIN).unwrap();
        let equippable = mail.as_item().and_then(|data| data.equippable).unwrap();

        assert_eq!(equippable.slot, EquipmentSlot::Armor);
        assert_eq!(equippable.defense_bonus, 3);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let factory = ContentFactory::new("/nonexistent/content");

        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
    }
}
