//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use loot_core::{EngineConfig, InventoryTemplate, ItemInfo};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult, PresetLoader, TemplateLoader};
use crate::presets::LoadoutPreset;

/// Content factory that loads all stash content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron      (or items.json)
/// ├── templates.ron
/// └── presets.ron
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

    /// Load engine configuration from `config.toml`, or defaults if the file
    /// does not exist.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load item descriptors from `items.ron`, falling back to `items.json`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemInfo>> {
        let ron = self.data_dir.join("items.ron");
        if ron.exists() {
            return ItemLoader::load(&ron);
        }
        ItemLoader::load(&self.data_dir.join("items.json"))
    }

    /// Load inventory templates from `templates.ron`.
    pub fn load_templates(&self) -> LoadResult<Vec<InventoryTemplate>> {
        TemplateLoader::load(&self.data_dir.join("templates.ron"))
    }

    /// Load loadout presets from `presets.ron`.
    pub fn load_presets(&self) -> LoadResult<Vec<LoadoutPreset>> {
        PresetLoader::load(&self.data_dir.join("presets.ron"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
