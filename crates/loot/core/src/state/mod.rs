//! Authoritative stash state.
//!
//! Items, grids, containers, inventories, and regions live in id-keyed arenas.
//! Ownership is expressed by ids (`ItemState::parent`, `GridState::owner`), so
//! moving an item never clones or re-parents heap data. Runtime layers query
//! this state freely but mutate it exclusively through the engine.
mod error;
mod query;
pub mod template;
pub mod types;

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::EngineConfig;
use crate::env::ItemInfo;

pub use error::StateError;
pub use template::{InventoryTemplate, NodeSpec};
pub use types::{
    AcceptSet, AccessorySlot, AmmoLoad, CarriedLayout, CarriedSlot, Cell, CellRect, ContainerId,
    ContainerSpec, ContainerState, ContentNode, Grade, GridId, GridOwner, GridSpec, GridState,
    InfoId, InventoryId, InventoryState, ItemCategory, ItemId, ItemState, NodeKind, RegionId,
    RegionState, ScreenPoint, ScreenRect, ScrollState, SearchState, SlotBinding, StackCount,
    StoredItem,
};

/// Canonical snapshot of every stash entity.
///
/// Maps are ordered by id so iteration (and therefore pointer resolution and
/// placement scans) is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StashState {
    /// Shared id allocator; ids are never reused.
    next_id: u32,
    pub items: BTreeMap<ItemId, ItemState>,
    pub grids: BTreeMap<GridId, GridState>,
    pub containers: BTreeMap<ContainerId, ContainerState>,
    pub inventories: BTreeMap<InventoryId, InventoryState>,
    pub regions: BTreeMap<RegionId, RegionState>,
}

impl StashState {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> Result<u32, StateError> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or(StateError::IdOverflow { current: id })?;
        Ok(id)
    }

    // ===== lookups =====

    pub fn item(&self, id: ItemId) -> Result<&ItemState, StateError> {
        self.items.get(&id).ok_or(StateError::UnknownItem(id))
    }

    pub fn item_mut(&mut self, id: ItemId) -> Result<&mut ItemState, StateError> {
        self.items.get_mut(&id).ok_or(StateError::UnknownItem(id))
    }

    pub fn grid(&self, id: GridId) -> Result<&GridState, StateError> {
        self.grids.get(&id).ok_or(StateError::UnknownGrid(id))
    }

    pub fn grid_mut(&mut self, id: GridId) -> Result<&mut GridState, StateError> {
        self.grids.get_mut(&id).ok_or(StateError::UnknownGrid(id))
    }

    pub fn container(&self, id: ContainerId) -> Result<&ContainerState, StateError> {
        self.containers
            .get(&id)
            .ok_or(StateError::UnknownContainer(id))
    }

    pub fn container_mut(&mut self, id: ContainerId) -> Result<&mut ContainerState, StateError> {
        self.containers
            .get_mut(&id)
            .ok_or(StateError::UnknownContainer(id))
    }

    pub fn inventory(&self, id: InventoryId) -> Result<&InventoryState, StateError> {
        self.inventories
            .get(&id)
            .ok_or(StateError::UnknownInventory(id))
    }

    pub fn inventory_mut(&mut self, id: InventoryId) -> Result<&mut InventoryState, StateError> {
        self.inventories
            .get_mut(&id)
            .ok_or(StateError::UnknownInventory(id))
    }

    pub fn region(&self, id: RegionId) -> Result<&RegionState, StateError> {
        self.regions.get(&id).ok_or(StateError::UnknownRegion(id))
    }

    pub fn region_mut(&mut self, id: RegionId) -> Result<&mut RegionState, StateError> {
        self.regions
            .get_mut(&id)
            .ok_or(StateError::UnknownRegion(id))
    }

    // ===== construction =====

    pub fn create_region(
        &mut self,
        title: impl Into<String>,
        countable: bool,
    ) -> Result<RegionId, StateError> {
        let id = RegionId(self.allocate_id()?);
        self.regions
            .insert(id, RegionState::new(id, title, countable));
        Ok(id)
    }

    /// Creates an empty inventory. When attached to a region it inherits the
    /// region's countable flag and only the first inventory starts enabled.
    pub fn create_inventory(
        &mut self,
        title: impl Into<String>,
        region: Option<RegionId>,
    ) -> Result<InventoryId, StateError> {
        let (countable, enabled) = match region {
            Some(region) => {
                let region = self.region(region)?;
                (region.countable, region.inventories.is_empty())
            }
            None => (true, true),
        };

        let id = InventoryId(self.allocate_id()?);
        self.inventories.insert(
            id,
            InventoryState {
                id,
                title: title.into(),
                nodes: Vec::new(),
                countable,
                enabled,
                scroll: ScrollState::default(),
                region,
            },
        );
        if let Some(region) = region {
            self.region_mut(region)?.inventories.push(id);
        }
        Ok(id)
    }

    pub fn create_grid(&mut self, spec: &GridSpec, owner: GridOwner) -> Result<GridId, StateError> {
        let id = GridId(self.allocate_id()?);
        self.grids.insert(id, GridState::new(id, spec, owner));
        Ok(id)
    }

    /// Creates a container and one member grid per layout rectangle.
    pub fn create_container(
        &mut self,
        spec: &ContainerSpec,
        owner: Option<InventoryId>,
    ) -> Result<ContainerId, StateError> {
        let id = ContainerId(self.allocate_id()?);
        self.containers.insert(
            id,
            ContainerState {
                id,
                title: spec.title.clone(),
                layout: Vec::new(),
                grids: Vec::new(),
                default_layout: spec.layout.clone(),
                countable: spec.countable,
                accept: spec.accept.clone(),
                cell_size: spec.cell_size,
                owner,
                bound_slot: None,
                carried_by: None,
            },
        );
        for rect in &spec.layout {
            self.push_container_grid(id, *rect)?;
        }
        Ok(id)
    }

    /// Appends a member grid described by `rect` to a container.
    pub(crate) fn push_container_grid(
        &mut self,
        container: ContainerId,
        rect: crate::env::LayoutRect,
    ) -> Result<GridId, StateError> {
        let owner = self.container(container)?;
        let spec = GridSpec {
            title: owner.title.clone(),
            width: rect.width,
            height: rect.height,
            cell_size: owner.cell_size,
            aspect: 1.0,
            fullfill: false,
            countable: owner.countable,
            accept: owner.accept.clone(),
        };
        let grid = self.create_grid(&spec, GridOwner::Container(container))?;
        let owner = self.container_mut(container)?;
        owner.layout.push(rect);
        owner.grids.push(grid);
        Ok(grid)
    }

    /// Creates a loose item instance from a descriptor.
    ///
    /// Accessory sockets are created as single-occupant grids owned by the
    /// item; a subgrid layout becomes the item's carried layout.
    pub fn spawn_item(
        &mut self,
        info: &ItemInfo,
        config: &EngineConfig,
    ) -> Result<ItemId, StateError> {
        if info.accessories.len() > EngineConfig::MAX_ACCESSORY_SLOTS {
            return Err(StateError::TooManySlots {
                max: EngineConfig::MAX_ACCESSORY_SLOTS,
                requested: info.accessories.len(),
            });
        }

        let id = ItemId(self.allocate_id()?);
        let mut slots = ArrayVec::new();
        for spec in &info.accessories {
            let socket = GridSpec::socket(spec.accept.clone()).titled(spec.name.clone());
            let grid = self.create_grid(&socket, GridOwner::Item(id))?;
            slots
                .try_push(AccessorySlot {
                    name: spec.name.clone(),
                    grid,
                })
                .map_err(|_| StateError::TooManySlots {
                    max: EngineConfig::MAX_ACCESSORY_SLOTS,
                    requested: info.accessories.len(),
                })?;
        }

        let max = info.effective_max_stack();
        let search = if config.needs_search {
            SearchState::hidden(info.search_seconds.unwrap_or(config.default_search_seconds))
        } else {
            SearchState::revealed()
        };
        let layout =
            (!info.subgrid_layout.is_empty()).then(|| CarriedLayout::from_rects(&info.subgrid_layout));

        self.items.insert(
            id,
            ItemState {
                id,
                info: info.id,
                name: info.name.clone(),
                category: info.category.clone(),
                grade: info.grade,
                width: info.width,
                height: info.height,
                rotated: false,
                cell: Cell::ORIGIN,
                base_value: info.base_value,
                stack: StackCount::new(info.stack.clamp(1, max.max(1)), max),
                slots,
                gun: info.gun.clone(),
                ammo_caliber: info.caliber.clone(),
                ammo: BTreeMap::new(),
                layout,
                search,
                parent: None,
                region: None,
            },
        );
        Ok(id)
    }

    // ===== ownership queries =====

    /// Inventory a grid ultimately belongs to, following sockets through the
    /// items that own them.
    pub fn inventory_of_grid(&self, grid: GridId) -> Option<InventoryId> {
        let mut current = grid;
        for _ in 0..EngineConfig::MAX_NESTING_DEPTH {
            match self.grids.get(&current)?.owner {
                GridOwner::Inventory(inventory) => return Some(inventory),
                GridOwner::Container(container) => return self.containers.get(&container)?.owner,
                GridOwner::Item(item) => current = self.items.get(&item)?.parent?,
                GridOwner::Detached => return None,
            }
        }
        None
    }

    pub fn region_of_grid(&self, grid: GridId) -> Option<RegionId> {
        let inventory = self.inventory_of_grid(grid)?;
        self.inventories.get(&inventory)?.region
    }

    /// Grids of disabled inventories do not take part in pointer resolution.
    pub fn is_targetable(&self, grid: GridId) -> bool {
        self.inventory_of_grid(grid)
            .and_then(|inventory| self.inventories.get(&inventory))
            .is_some_and(|inventory| inventory.enabled)
    }

    /// Item whose interior `grid` is: the socket owner, or the carrier whose
    /// layout is installed in the grid's container.
    fn carrier_of_grid(&self, grid: &GridState) -> Option<ItemId> {
        match grid.owner {
            GridOwner::Item(owner) => Some(owner),
            GridOwner::Container(container) => self.containers.get(&container)?.carried_by,
            GridOwner::Inventory(_) | GridOwner::Detached => None,
        }
    }

    /// True if `grid` lies anywhere inside `item` (its sockets, an installed
    /// layout, or recursively inside something it carries).
    pub fn grid_within_item(&self, grid: GridId, item: ItemId) -> bool {
        let mut current = grid;
        for _ in 0..EngineConfig::MAX_NESTING_DEPTH {
            let Some(state) = self.grids.get(&current) else {
                return false;
            };
            let Some(carrier) = self.carrier_of_grid(state) else {
                return false;
            };
            if carrier == item {
                return true;
            }
            match self.items.get(&carrier).and_then(|carrier| carrier.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    /// Members of `grid` resolved to their states, in insertion order.
    pub fn items_in(&self, grid: GridId) -> impl Iterator<Item = &ItemState> + '_ {
        self.grids
            .get(&grid)
            .into_iter()
            .flat_map(|grid| grid.items.iter())
            .filter_map(|id| self.items.get(id))
    }

    /// Grids of an inventory in node order, container members included.
    pub fn inventory_grids(&self, inventory: InventoryId) -> Result<Vec<GridId>, StateError> {
        let inventory = self.inventory(inventory)?;
        let mut grids = Vec::new();
        for node in &inventory.nodes {
            match &node.kind {
                NodeKind::Grid(grid) => grids.push(*grid),
                NodeKind::Container(container) => {
                    grids.extend(self.container(*container)?.grids.iter().copied())
                }
                NodeKind::Title(_) => {}
            }
        }
        Ok(grids)
    }
}
