use super::{InventoryId, RegionId};

/// Ordered inventories with one active at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionState {
    pub id: RegionId,
    pub title: String,
    pub inventories: Vec<InventoryId>,
    pub current: usize,
    /// Inherited by inventories created inside this region.
    pub countable: bool,
}

impl RegionState {
    pub fn new(id: RegionId, title: impl Into<String>, countable: bool) -> Self {
        Self {
            id,
            title: title.into(),
            inventories: Vec::new(),
            current: 0,
            countable,
        }
    }

    pub fn current_inventory(&self) -> Option<InventoryId> {
        self.inventories.get(self.current).copied()
    }
}
