//! Content loaders for reading stash data from files.
//!
//! Each loader turns one RON, JSON, or TOML file into the core or preset types
//! it describes. Errors carry the file path and format.

pub mod config;
pub mod factory;
pub mod item;
pub mod preset;
pub mod template;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::{ItemLoader, ItemTable};
pub use preset::PresetLoader;
pub use template::TemplateLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
