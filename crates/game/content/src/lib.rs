//! Data-driven entity templates.
//!
//! This crate houses the prefab catalog the simulation instantiates entities
//! from, plus loaders for the RON/TOML data files:
//! - Entity templates (actors, items, scenery) keyed by name
//! - Spawn tables used when populating freshly generated rooms
//! - Game configuration overrides
//!
//! Content is consumed through [`game_core::TemplateRegistry`] and never
//! appears in game state beyond the template name each entity carries.

pub mod catalog;
pub mod spawn;
pub mod template;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::TemplateCatalog;
pub use spawn::{SpawnEntry, SpawnTables};
pub use template::{ActorTemplate, AiSpec, ItemTemplate, Template, TemplateKind};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ContentFile, TemplateLoader};
