use crate::config::EngineConfig;

use super::{AcceptSet, Cell, CellRect, ContainerId, GridId, InventoryId, ItemId, ItemState};

/// A fixed-size rectangular cell grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridState {
    pub id: GridId,
    pub title: String,
    pub width: u16,
    pub height: u16,
    pub cell_size: f32,
    pub aspect: f32,
    /// Single-occupant socket: one item at (0,0) filling the grid.
    pub fullfill: bool,
    pub countable: bool,
    pub accept: AcceptSet,
    pub owner: GridOwner,
    pub binding: Option<SlotBinding>,
    /// Members in insertion order.
    pub items: Vec<ItemId>,
}

impl GridState {
    pub fn new(id: GridId, spec: &GridSpec, owner: GridOwner) -> Self {
        Self {
            id,
            title: spec.title.clone(),
            width: spec.width,
            height: spec.height,
            cell_size: spec.cell_size,
            aspect: spec.aspect,
            fullfill: spec.fullfill,
            countable: spec.countable,
            accept: spec.accept.clone(),
            owner,
            binding: None,
            items: Vec::new(),
        }
    }

    pub fn check_accept(&self, item: &ItemState) -> bool {
        self.accept.accepts(&item.category)
    }

    /// Boundary test for `item` at `cell`, optionally with its footprint flipped.
    pub fn check_boundary(&self, item: &ItemState, cell: Cell, flipped: bool) -> bool {
        if self.fullfill {
            return cell == Cell::ORIGIN;
        }
        let (width, height) = item.footprint(flipped);
        self.bounds().contains_rect(&CellRect::at(cell, width, height))
    }

    pub const fn bounds(&self) -> CellRect {
        CellRect::new(0, 0, self.width, self.height)
    }

    /// Rectangle an occupant claims: the whole grid for sockets, its own
    /// footprint otherwise.
    pub const fn claimed_rect(&self, rect: CellRect) -> CellRect {
        if self.fullfill { self.bounds() } else { rect }
    }

    /// Pixel size of an occupant, handed to the presentation resize hook.
    pub fn pixel_size(&self, item: &ItemState) -> (f32, f32) {
        let column = self.cell_size * self.aspect;
        if self.fullfill {
            (column * f32::from(self.width), self.cell_size * f32::from(self.height))
        } else {
            (column * f32::from(item.width), self.cell_size * f32::from(item.height))
        }
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Who a grid belongs to. Region and targetability are derived from this chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridOwner {
    Inventory(InventoryId),
    Container(ContainerId),
    /// Accessory socket of an item.
    Item(ItemId),
    Detached,
}

/// Side effect attached to a socket grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotBinding {
    /// The occupant's carried layout is installed into this container.
    Equip(ContainerId),
}

/// Construction parameters for a grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    pub width: u16,
    pub height: u16,
    #[cfg_attr(feature = "serde", serde(default = "default_cell_size"))]
    pub cell_size: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_aspect"))]
    pub aspect: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fullfill: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_countable"))]
    pub countable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub accept: AcceptSet,
}

#[cfg(feature = "serde")]
fn default_cell_size() -> f32 {
    EngineConfig::DEFAULT_CELL_SIZE
}

#[cfg(feature = "serde")]
fn default_aspect() -> f32 {
    1.0
}

#[cfg(feature = "serde")]
fn default_countable() -> bool {
    true
}

impl GridSpec {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            title: String::new(),
            width,
            height,
            cell_size: EngineConfig::DEFAULT_CELL_SIZE,
            aspect: 1.0,
            fullfill: false,
            countable: true,
            accept: AcceptSet::any(),
        }
    }

    /// A 1x1 single-occupant socket.
    pub fn socket(accept: AcceptSet) -> Self {
        Self {
            fullfill: true,
            accept,
            ..Self::new(1, 1)
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn accepting(mut self, accept: AcceptSet) -> Self {
        self.accept = accept;
        self
    }

    pub fn with_cell_size(mut self, cell_size: f32, aspect: f32) -> Self {
        self.cell_size = cell_size;
        self.aspect = aspect;
        self
    }

    pub fn uncounted(mut self) -> Self {
        self.countable = false;
        self
    }
}
