//! Content loaders for reading game data from files.
//!
//! Templates and spawn tables are RON; configuration overrides are TOML.

pub mod config;
pub mod factory;
pub mod templates;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use templates::{ContentFile, TemplateLoader};

use std::path::Path;

use anyhow::Context;

pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}
