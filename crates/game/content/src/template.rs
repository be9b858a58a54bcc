//! Template definitions.

use game_core::{
    ActorData, ActorRole, AiPolicy, Consumable, Entity, EntityKind, Equippable, FighterState,
    GameConfig, ItemData, Level, LevelState, Position,
};

/// Starting policy of a templated actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiSpec {
    Pursue,
}

impl AiSpec {
    pub fn build(self) -> AiPolicy {
        match self {
            AiSpec::Pursue => AiPolicy::pursue(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    pub role: ActorRole,
    pub max_hp: i32,
    pub defense: i32,
    pub power: i32,
    /// Experience granted to the player on kill.
    #[cfg_attr(feature = "serde", serde(default))]
    pub xp_given: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai: Option<AiSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumable: Option<Consumable>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equippable: Option<Equippable>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateKind {
    Actor(ActorTemplate),
    Item(ItemTemplate),
    Other { blocks_movement: bool },
}

/// A named prefab.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Template {
    pub name: String,
    pub kind: TemplateKind,
}

impl Template {
    /// Builds a fresh entity at `position`.
    ///
    /// Sight radius, inventory capacity and the level curve come from the
    /// configuration so every actor of a session shares them.
    pub fn build(&self, position: Position, config: &GameConfig) -> Entity {
        match &self.kind {
            TemplateKind::Actor(actor) => {
                let mut data = ActorData::new(actor.role, config.fov_radius)
                    .with_fighter(FighterState::new(actor.max_hp, actor.defense, actor.power))
                    .with_level(Level::new(
                        LevelState::new(config.level_curve()),
                        actor.xp_given,
                    ));
                if actor.inventory {
                    data = data.with_inventory(config.inventory_capacity);
                }
                if actor.equipment {
                    data = data.with_equipment();
                }
                if let Some(ai) = actor.ai {
                    data = data.with_ai(ai.build());
                }
                Entity::actor(self.name.clone(), position, data)
            }
            TemplateKind::Item(item) => Entity::item(
                self.name.clone(),
                position,
                ItemData {
                    consumable: item.consumable,
                    equippable: item.equippable,
                    container: None,
                },
            ),
            TemplateKind::Other { blocks_movement } => Entity::new(
                self.name.clone(),
                position,
                *blocks_movement,
                EntityKind::Other,
            ),
        }
    }
}
