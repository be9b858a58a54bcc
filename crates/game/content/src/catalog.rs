use std::collections::BTreeMap;

use game_core::{Entity, GameConfig, Position, TemplateRegistry};
use tracing::warn;

use crate::{SpawnTables, Template};

/// Template registry backed by an in-memory catalog.
#[derive(Clone, Debug)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, Template>,
    spawns: SpawnTables,
    config: GameConfig,
}

impl TemplateCatalog {
    /// Builds a catalog. A later template replaces an earlier one of the same
    /// name.
    pub fn new(
        templates: impl IntoIterator<Item = Template>,
        spawns: SpawnTables,
        config: GameConfig,
    ) -> Self {
        let mut by_name = BTreeMap::new();
        for template in templates {
            if let Some(previous) = by_name.insert(template.name.clone(), template) {
                warn!(name = %previous.name, "template redefined");
            }
        }
        Self {
            templates: by_name,
            spawns,
            config,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn spawns(&self) -> &SpawnTables {
        &self.spawns
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Spawn-table entries naming templates the catalog does not define.
    pub fn dangling_spawns(&self) -> Vec<&str> {
        self.spawns
            .monsters
            .iter()
            .chain(&self.spawns.items)
            .map(|entry| entry.template.as_str())
            .filter(|name| !self.templates.contains_key(*name))
            .collect()
    }
}

impl TemplateRegistry for TemplateCatalog {
    fn instantiate(&self, name: &str, position: Position) -> Option<Entity> {
        self.templates
            .get(name)
            .map(|template| template.build(position, &self.config))
    }

    fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{ActorRole, Consumable, EntityKind};

    use super::*;
    use crate::{ActorTemplate, AiSpec, ItemTemplate, SpawnEntry, TemplateKind};

    fn catalog() -> TemplateCatalog {
        let orc = Template {
            name: "Orc".to_string(),
            kind: TemplateKind::Actor(ActorTemplate {
                role: ActorRole::Npc,
                max_hp: 10,
                defense: 0,
                power: 3,
                xp_given: 35,
                ai: Some(AiSpec::Pursue),
                inventory: false,
                equipment: false,
            }),
        };
        let potion = Template {
            name: "Health Potion".to_string(),
            kind: TemplateKind::Item(ItemTemplate {
                consumable: Some(Consumable::Healing { amount: 4 }),
                equippable: None,
            }),
        };
        let spawns = SpawnTables {
            monsters: vec![SpawnEntry {
                template: "Goblin".to_string(),
                weight: 1,
                min_floor: 1,
            }],
            items: vec![],
        };
        TemplateCatalog::new([orc, potion], spawns, GameConfig::default())
    }

    #[test]
    fn instantiates_fresh_entities() {
        let catalog = catalog();

        let orc = catalog.instantiate("Orc", Position::new(3, 4)).unwrap();

        assert_eq!(orc.name, "Orc");
        assert_eq!(orc.position, Position::new(3, 4));
        assert!(orc.blocks_movement);
        let data = orc.as_actor().unwrap();
        assert!(data.alive);
        assert_eq!(data.fighter.as_ref().unwrap().hp(), 10);
        assert_eq!(data.level.unwrap().xp_given, 35);
        assert!(data.ai.is_some());
        assert_eq!(data.fov_range, GameConfig::default().fov_radius);
    }

    #[test]
    fn items_start_on_the_floor() {
        let potion = catalog()
            .instantiate("Health Potion", Position::ORIGIN)
            .unwrap();

        assert!(!potion.blocks_movement);
        assert!(matches!(&potion.kind, EntityKind::Item(data) if data.container.is_none()));
    }

    #[test]
    fn unknown_names_are_reported() {
        let catalog = catalog();

        assert!(catalog.instantiate("Dragon", Position::ORIGIN).is_none());
        assert!(!catalog.contains("Dragon"));
        assert_eq!(catalog.dangling_spawns(), ["Goblin"]);
    }
}
