use crate::env::LayoutRect;

use super::{AcceptSet, ContainerId, GridId, InventoryId, ItemId};

/// A composite panel of grids placed at fixed offsets.
///
/// `layout[i]` describes `grids[i]`; the two vectors always have equal length.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerState {
    pub id: ContainerId,
    pub title: String,
    pub layout: Vec<LayoutRect>,
    pub grids: Vec<GridId>,
    /// Layout restored when an equipped carrier is removed.
    pub default_layout: Vec<LayoutRect>,
    pub countable: bool,
    pub accept: AcceptSet,
    pub cell_size: f32,
    pub owner: Option<InventoryId>,
    /// Socket whose occupant's layout is installed here, if any.
    pub bound_slot: Option<GridId>,
    /// Carrier whose layout is currently installed.
    pub carried_by: Option<ItemId>,
}

impl ContainerState {
    /// Panel extent in cells: `(max x + width, max y + height)` over the layout.
    pub fn extent(&self) -> (f32, f32) {
        self.layout.iter().fold((0.0, 0.0), |(w, h), rect| {
            (
                f32::max(w, rect.x + f32::from(rect.width)),
                f32::max(h, rect.y + f32::from(rect.height)),
            )
        })
    }

    pub fn members(&self) -> impl Iterator<Item = (GridId, &LayoutRect)> + '_ {
        self.grids.iter().copied().zip(self.layout.iter())
    }
}

/// Construction parameters for a container.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerSpec {
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub layout: Vec<LayoutRect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub accept: AcceptSet,
    #[cfg_attr(feature = "serde", serde(default = "default_countable"))]
    pub countable: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_cell_size"))]
    pub cell_size: f32,
}

#[cfg(feature = "serde")]
fn default_countable() -> bool {
    true
}

#[cfg(feature = "serde")]
fn default_cell_size() -> f32 {
    crate::EngineConfig::DEFAULT_CELL_SIZE
}

impl ContainerSpec {
    pub fn new(title: impl Into<String>, layout: Vec<LayoutRect>) -> Self {
        Self {
            title: title.into(),
            layout,
            accept: AcceptSet::any(),
            countable: true,
            cell_size: crate::EngineConfig::DEFAULT_CELL_SIZE,
        }
    }

    /// Container that starts empty and receives a carried layout on equip.
    pub fn carrier(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    pub fn accepting(mut self, accept: AcceptSet) -> Self {
        self.accept = accept;
        self
    }

    pub fn uncounted(mut self) -> Self {
        self.countable = false;
        self
    }
}
