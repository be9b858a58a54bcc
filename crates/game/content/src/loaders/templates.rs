//! Template catalog loader.

use std::path::Path;

use game_core::GameConfig;
use tracing::{debug, warn};

use crate::loaders::{LoadResult, read_file};
use crate::{SpawnTables, Template, TemplateCatalog};

/// On-disk layout of a template file.
///
/// ```ron
/// (
///     templates: [
///         (name: "Orc", kind: Actor((role: Npc, max_hp: 10, defense: 0, power: 3, ai: Some(Pursue)))),
///     ],
///     spawns: (monsters: [(template: "Orc", weight: 80)]),
/// )
/// ```
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct ContentFile {
    pub templates: Vec<Template>,
    #[serde(default)]
    pub spawns: SpawnTables,
}

/// Loader for template catalogs from RON files.
pub struct TemplateLoader;

impl TemplateLoader {
    pub fn load(path: &Path, config: &GameConfig) -> LoadResult<TemplateCatalog> {
        let content = read_file(path)?;
        Self::parse(&content, config).map_err(|e| {
            anyhow::anyhow!("Failed to parse template RON at {}: {}", path.display(), e)
        })
    }

    pub fn parse(content: &str, config: &GameConfig) -> LoadResult<TemplateCatalog> {
        let file: ContentFile = ron::from_str(content)?;
        let catalog = TemplateCatalog::new(file.templates, file.spawns, config.clone());

        for name in catalog.dangling_spawns() {
            warn!(template = name, "spawn table names an unknown template");
        }
        debug!(templates = catalog.names().count(), "template catalog loaded");
        Ok(catalog)
    }
}
