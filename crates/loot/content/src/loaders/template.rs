//! Inventory template loader.

use std::path::Path;

use loot_core::InventoryTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateCatalog {
    pub templates: Vec<InventoryTemplate>,
}

/// Loader for inventory templates from RON files.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load every template of a RON catalog.
    pub fn load(path: &Path) -> LoadResult<Vec<InventoryTemplate>> {
        let content = read_file(path)?;
        let catalog: TemplateCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse template RON: {}", e))?;

        Ok(catalog.templates)
    }

    /// Load the template titled `title`.
    pub fn load_named(path: &Path, title: &str) -> LoadResult<InventoryTemplate> {
        Self::load(path)?
            .into_iter()
            .find(|template| template.title == title)
            .ok_or_else(|| anyhow::anyhow!("Template '{}' not found in {}", title, path.display()))
    }
}
