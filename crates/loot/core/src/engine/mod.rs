//! Placement engine.
//!
//! [`StashEngine`] is the only writer of [`StashState`]. Every public call
//! validates, mutates, and records [`StashEvent`]s; region totals touched by
//! the call are recomputed once at the end and reported as
//! [`StashEvent::ValueChanged`].

mod drop;
mod errors;
mod events;
mod layout;
mod search;

pub use drop::{DropOutcome, DropPreview, DropTarget, RevertReason, preview_drop};
pub use errors::PlacementError;
pub use events::StashEvent;

use std::collections::BTreeSet;

use crate::config::EngineConfig;
use crate::env::ItemInfo;
use crate::state::{
    Cell, ContainerId, GridId, InventoryId, ItemId, NodeKind, RegionId, StashState, StateError,
};

/// Engine that applies placement operations to a borrowed [`StashState`].
pub struct StashEngine<'a> {
    state: &'a mut StashState,
    events: Vec<StashEvent>,
    dirty: BTreeSet<RegionId>,
}

impl<'a> StashEngine<'a> {
    pub fn new(state: &'a mut StashState) -> Self {
        Self {
            state,
            events: Vec::new(),
            dirty: BTreeSet::new(),
        }
    }

    pub fn state(&self) -> &StashState {
        self.state
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[StashEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<StashEvent> {
        self.events
    }

    pub fn drain_events(&mut self) -> Vec<StashEvent> {
        core::mem::take(&mut self.events)
    }

    pub(crate) fn state_mut(&mut self) -> &mut StashState {
        self.state
    }

    pub(crate) fn record(&mut self, event: StashEvent) {
        self.events.push(event);
    }

    // ===== spawning =====

    /// Creates a loose item. It joins a region only once placed.
    pub fn spawn(&mut self, info: &ItemInfo, config: &EngineConfig) -> Result<ItemId, StateError> {
        self.state.spawn_item(info, config)
    }

    /// Turns a loose item by 90 degrees. Placed items are left alone and
    /// `false` is returned; rotation of placed items happens through drops.
    pub fn rotate_loose(&mut self, item: ItemId) -> Result<bool, StateError> {
        let item = self.state.item_mut(item)?;
        if item.parent.is_some() {
            return Ok(false);
        }
        item.rotate();
        Ok(true)
    }

    // ===== grid operations =====

    /// Places `item` into `grid`.
    ///
    /// With an explicit cell the target is still checked for boundary and
    /// overlap; without one the grid is scanned row-major for the first free
    /// cell. The item is detached from its previous grid only after the new
    /// position has been validated, so a failure leaves it where it was.
    pub fn add_item(
        &mut self,
        grid: GridId,
        item: ItemId,
        at: Option<Cell>,
    ) -> Result<Cell, PlacementError> {
        let cell = self.place(grid, item, at)?;
        self.flush_values();
        Ok(cell)
    }

    /// Removes `item` from `grid`, optionally destroying it.
    pub fn remove_item(
        &mut self,
        grid: GridId,
        item: ItemId,
        destroy: bool,
    ) -> Result<(), PlacementError> {
        if !self.state.grid(grid)?.contains(item) {
            return Err(PlacementError::NotInGrid { item, grid });
        }
        if destroy {
            self.destroy(item)?;
        } else {
            self.detach(item)?;
        }
        self.flush_values();
        Ok(())
    }

    /// Destroys an item together with everything it contains.
    pub fn destroy_item(&mut self, item: ItemId) -> Result<(), StateError> {
        self.destroy(item)?;
        self.flush_values();
        Ok(())
    }

    // ===== composite targets =====

    /// Offers `item` to each member grid in order; the first that takes it wins.
    pub fn add_to_container(
        &mut self,
        container: ContainerId,
        item: ItemId,
    ) -> Result<(GridId, Cell), PlacementError> {
        let placed = self.place_in_container(container, item)?;
        self.flush_values();
        placed.ok_or(PlacementError::NoRoom { item })
    }

    /// Tries every direct grid, then every container, skipping titles.
    pub fn add_to_inventory(
        &mut self,
        inventory: InventoryId,
        item: ItemId,
    ) -> Result<(GridId, Cell), PlacementError> {
        let placed = self.place_in_inventory(inventory, item)?;
        self.flush_values();
        placed.ok_or(PlacementError::NoRoom { item })
    }

    /// Targets the region's currently active inventory.
    pub fn add_to_region(
        &mut self,
        region: RegionId,
        item: ItemId,
    ) -> Result<(GridId, Cell), PlacementError> {
        let Some(inventory) = self.state.region(region)?.current_inventory() else {
            return Err(PlacementError::NoRoom { item });
        };
        self.add_to_inventory(inventory, item)
    }

    // ===== inventory / region state =====

    pub fn set_inventory_enabled(
        &mut self,
        inventory: InventoryId,
        enabled: bool,
    ) -> Result<(), StateError> {
        self.state.inventory_mut(inventory)?.enabled = enabled;
        Ok(())
    }

    /// Makes inventory `index` of `region` the active one.
    ///
    /// Out-of-range indices are ignored and return `false`.
    pub fn switch_region(&mut self, region: RegionId, index: usize) -> Result<bool, StateError> {
        let state = self.state.region(region)?;
        let Some(&target) = state.inventories.get(index) else {
            return Ok(false);
        };
        if let Some(current) = state.current_inventory() {
            self.set_inventory_enabled(current, false)?;
        }
        self.set_inventory_enabled(target, true)?;
        self.state.region_mut(region)?.current = index;
        self.dirty.insert(region);
        self.flush_values();
        Ok(true)
    }

    /// Scrolls an inventory panel; returns the clamped offset.
    pub fn scroll_inventory(
        &mut self,
        inventory: InventoryId,
        delta: f32,
    ) -> Result<f32, StateError> {
        let scroll = &mut self.state.inventory_mut(inventory)?.scroll;
        scroll.scroll_by(delta);
        Ok(scroll.offset)
    }

    // ===== batches =====

    /// Runs `batch` against a scratch copy of the state. The copy and its
    /// events are committed only when `batch` succeeds; otherwise nothing
    /// changes.
    pub fn atomically<T, E>(
        &mut self,
        batch: impl FnOnce(&mut StashEngine<'_>) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut scratch = self.state.clone();
        let (result, events, dirty) = {
            let mut nested = StashEngine::new(&mut scratch);
            let result = batch(&mut nested);
            (result, nested.events, nested.dirty)
        };

        let value = result?;
        *self.state = scratch;
        self.events.extend(events);
        self.dirty.extend(dirty);
        Ok(value)
    }

    // ===== internals =====

    /// Validates the target cell without touching state.
    fn validate(
        &self,
        grid: GridId,
        item: ItemId,
        at: Option<Cell>,
    ) -> Result<Cell, PlacementError> {
        let target = self.state.grid(grid)?;
        let moving = self.state.item(item)?;

        if !target.check_accept(moving) {
            return Err(PlacementError::Rejected {
                item,
                grid,
                category: moving.category.clone(),
            });
        }
        if self.state.grid_within_item(grid, item) {
            return Err(PlacementError::WouldContainItself { item, grid });
        }

        match at {
            Some(cell) => {
                if !target.check_boundary(moving, cell, false) {
                    return Err(PlacementError::OutOfBounds { item, grid, cell });
                }
                let overlapping = self.state.overlapping_items(grid, item, cell, false)?;
                match overlapping.first() {
                    Some(&with) => Err(PlacementError::Overlap {
                        item,
                        grid,
                        cell,
                        with,
                    }),
                    None => Ok(cell),
                }
            }
            None => self
                .state
                .first_free_cell(grid, item)?
                .ok_or(PlacementError::NoFreeCell { item, grid }),
        }
    }

    /// Validate, detach from the previous grid, attach to the new one.
    pub(crate) fn place(
        &mut self,
        grid: GridId,
        item: ItemId,
        at: Option<Cell>,
    ) -> Result<Cell, PlacementError> {
        let cell = self.validate(grid, item, at)?;
        let from = self.detach(item)?;
        self.attach(grid, item, cell, from)?;
        Ok(cell)
    }

    fn place_in_container(
        &mut self,
        container: ContainerId,
        item: ItemId,
    ) -> Result<Option<(GridId, Cell)>, PlacementError> {
        let grids = self.state.container(container)?.grids.clone();
        for grid in grids {
            if let Some(cell) = self.try_place(grid, item)? {
                return Ok(Some((grid, cell)));
            }
        }
        Ok(None)
    }

    fn place_in_inventory(
        &mut self,
        inventory: InventoryId,
        item: ItemId,
    ) -> Result<Option<(GridId, Cell)>, PlacementError> {
        let nodes = self.state.inventory(inventory)?.nodes.clone();
        for node in &nodes {
            if let NodeKind::Grid(grid) = node.kind
                && let Some(cell) = self.try_place(grid, item)?
            {
                return Ok(Some((grid, cell)));
            }
        }
        for node in &nodes {
            if let NodeKind::Container(container) = node.kind
                && let Some(placed) = self.place_in_container(container, item)?
            {
                return Ok(Some(placed));
            }
        }
        Ok(None)
    }

    /// Auto-placement where a refusal means "try the next grid".
    fn try_place(&mut self, grid: GridId, item: ItemId) -> Result<Option<Cell>, PlacementError> {
        match self.place(grid, item, None) {
            Ok(cell) => Ok(Some(cell)),
            Err(PlacementError::State(err)) => Err(err.into()),
            Err(_) => Ok(None),
        }
    }

    /// Removes `item` from its parent grid, if any. Returns the grid it left.
    pub(crate) fn detach(&mut self, item: ItemId) -> Result<Option<GridId>, StateError> {
        let moving = self.state.item(item)?;
        let Some(grid) = moving.parent else {
            return Ok(None);
        };
        if let Some(region) = moving.region {
            self.dirty.insert(region);
        }

        let binding = {
            let parent = self.state.grid_mut(grid)?;
            parent.items.retain(|&member| member != item);
            parent.binding
        };
        self.state.item_mut(item)?.parent = None;
        self.events.push(StashEvent::DraggedOut { item, grid });

        if let Some(crate::state::SlotBinding::Equip(container)) = binding {
            self.store_layout(item, container)?;
        }
        self.assign_region(item, None)?;
        Ok(Some(grid))
    }

    fn attach(
        &mut self,
        grid: GridId,
        item: ItemId,
        cell: Cell,
        from: Option<GridId>,
    ) -> Result<(), StateError> {
        let region = self.state.region_of_grid(grid);
        let binding = {
            let target = self.state.grid_mut(grid)?;
            target.items.push(item);
            target.binding
        };
        {
            let placed = self.state.item_mut(item)?;
            placed.parent = Some(grid);
            placed.cell = cell;
        }
        self.assign_region(item, region)?;

        let placed = self.state.item(item)?;
        let pixel_size = self.state.grid(grid)?.pixel_size(placed);
        self.events.push(StashEvent::Placed {
            item,
            grid,
            cell,
            rotated: placed.rotated,
            pixel_size,
        });
        self.events.push(StashEvent::DraggedIn {
            item,
            grid,
            cell,
            from,
        });

        if let Some(crate::state::SlotBinding::Equip(container)) = binding {
            self.install_layout(item, container)?;
        }
        if let Some(region) = region {
            self.dirty.insert(region);
        }
        Ok(())
    }

    /// Sets the weak region back-reference of `item` and everything inside it.
    fn assign_region(&mut self, item: ItemId, region: Option<RegionId>) -> Result<(), StateError> {
        let mut pending = vec![(item, 0usize)];
        while let Some((current, depth)) = pending.pop() {
            let state = self.state.item_mut(current)?;
            state.region = region;
            if depth >= EngineConfig::MAX_NESTING_DEPTH {
                continue;
            }
            let mut nested: Vec<ItemId> = state.layout.iter().flat_map(|l| l.items()).collect();
            let sockets: Vec<GridId> = state.slot_grids().collect();
            for socket in sockets {
                nested.extend(self.state.grid(socket)?.items.iter().copied());
            }
            pending.extend(nested.into_iter().map(|child| (child, depth + 1)));
        }
        Ok(())
    }

    /// Detaches and removes `item` with all sockets and stored contents.
    pub(crate) fn destroy(&mut self, item: ItemId) -> Result<(), StateError> {
        self.detach(item)?;
        self.destroy_tree(item)
    }

    fn destroy_tree(&mut self, item: ItemId) -> Result<(), StateError> {
        let removed = self
            .state
            .items
            .remove(&item)
            .ok_or(StateError::UnknownItem(item))?;

        let mut children: Vec<ItemId> = removed.layout.iter().flat_map(|l| l.items()).collect();
        for socket in removed.slot_grids() {
            if let Some(grid) = self.state.grids.remove(&socket) {
                children.extend(grid.items);
            }
        }
        for child in children {
            self.destroy_tree(child)?;
        }
        self.events.push(StashEvent::Destroyed { item });
        Ok(())
    }

    pub(crate) fn mark_dirty(&mut self, region: Option<RegionId>) {
        if let Some(region) = region {
            self.dirty.insert(region);
        }
    }

    /// Emits one `ValueChanged` per region touched since the last flush.
    pub(crate) fn flush_values(&mut self) {
        for region in core::mem::take(&mut self.dirty) {
            let total = self.state.region_value(region);
            self.events.push(StashEvent::ValueChanged { region, total });
        }
    }
}
