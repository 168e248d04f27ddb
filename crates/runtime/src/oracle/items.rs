//! [`loot_core::ItemOracle`] backed by in-memory maps.
use std::collections::HashMap;
use std::path::Path;

use loot_content::ItemLoader;
use loot_core::{InfoId, ItemInfo, ItemOracle};

/// Item descriptors indexed by id and by name.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    infos: HashMap<InfoId, ItemInfo>,
    names: HashMap<String, InfoId>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_infos(infos: impl IntoIterator<Item = ItemInfo>) -> Self {
        let mut catalog = Self::new();
        for info in infos {
            catalog.add_info(info);
        }
        catalog
    }

    /// Loads a RON or JSON catalog file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Ok(Self::from_infos(ItemLoader::load(path)?))
    }

    /// Adds a descriptor, replacing any previous one with the same id.
    pub fn add_info(&mut self, info: ItemInfo) {
        if let Some(previous) = self.infos.get(&info.id) {
            self.names.remove(&previous.name);
        }
        self.names.insert(info.name.clone(), info.id);
        self.infos.insert(info.id, info);
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}

impl ItemOracle for ItemCatalog {
    fn info_by_id(&self, id: InfoId) -> Option<ItemInfo> {
        self.infos.get(&id).cloned()
    }

    fn info_by_name(&self, name: &str) -> Option<ItemInfo> {
        self.names
            .get(name)
            .and_then(|id| self.infos.get(id))
            .cloned()
    }

    fn all_infos(&self) -> Vec<ItemInfo> {
        let mut infos: Vec<_> = self.infos.values().cloned().collect();
        infos.sort_by_key(|info| info.id);
        infos
    }
}
