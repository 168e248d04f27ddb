//! Item descriptor catalog loader.

use std::path::Path;

use loot_core::ItemInfo;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// On-disk item table shared by the RON and JSON formats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTable {
    pub items: Vec<ItemInfo>,
}

/// Loader for item descriptor catalogs.
pub struct ItemLoader;

impl ItemLoader {
    /// Load descriptors from a catalog file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as RON.
    /// Duplicate descriptor ids or names are rejected.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemInfo>> {
        let content = read_file(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let table: ItemTable = if is_json {
            serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse item catalog JSON: {}", e))?
        } else {
            ron::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?
        };

        Self::check_unique(&table.items)?;
        Ok(table.items)
    }

    fn check_unique(items: &[ItemInfo]) -> LoadResult<()> {
        let mut ids = std::collections::HashSet::new();
        let mut names = std::collections::HashSet::new();
        for info in items {
            if !ids.insert(info.id) {
                anyhow::bail!("Duplicate item id {} ('{}')", info.id, info.name);
            }
            if !names.insert(info.name.as_str()) {
                anyhow::bail!("Duplicate item name '{}'", info.name);
            }
        }
        Ok(())
    }
}
