//! Loadout preset loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::presets::LoadoutPreset;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetCatalog {
    pub presets: Vec<LoadoutPreset>,
}

/// Loader for loadout presets from RON files.
pub struct PresetLoader;

impl PresetLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<LoadoutPreset>> {
        let content = read_file(path)?;
        let catalog: PresetCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse preset RON: {}", e))?;

        Ok(catalog.presets)
    }
}
