pub mod actor;
pub mod common;
pub mod entity;
pub mod item;
pub mod map;
pub mod turn;

// Re-export all actor-related types
pub use actor::{
    ActorData, ActorRole, Equipment, Fighter, FighterState, Inventory, Level, LevelCurve,
    LevelState, Targeting,
};

// Re-export common types
pub use common::{EntityId, Offset, Position};

// Re-export entity types
pub use entity::{
    EQUIPPED_SUFFIX, Entity, EntityKind, REMAINS_PREFIX, is_equipped_label, template_name,
};

// Re-export item types
pub use item::{Consumable, EquipmentSlot, Equippable, ItemData};

// Re-export map memory
pub use map::{FogShade, MapMemory, Room, TileKind, TileRecord};

// Re-export turn state
pub use turn::TurnState;
