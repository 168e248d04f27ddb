//! Recursive value accounting.
//!
//! Totals are always recomputed from the arena rather than cached, so they
//! cannot drift from the placement state. Arithmetic saturates.

use crate::config::EngineConfig;
use crate::state::{ContainerId, GridId, InventoryId, ItemId, NodeKind, RegionId, StashState};

impl StashState {
    /// Base value times stack, plus accessories, loaded ammo, and anything
    /// stored in a carried layout.
    pub fn item_value(&self, item: ItemId) -> u64 {
        self.item_value_at(item, 0)
    }

    fn item_value_at(&self, item: ItemId, depth: usize) -> u64 {
        let Some(state) = self.items.get(&item) else {
            return 0;
        };
        let mut total = state
            .base_value
            .saturating_mul(u64::from(state.stack.current));
        for load in state.ammo.values() {
            total = total.saturating_add(load.unit_value.saturating_mul(u64::from(load.count)));
        }
        if depth >= EngineConfig::MAX_NESTING_DEPTH {
            return total;
        }
        for socket in state.slot_grids() {
            total = total.saturating_add(self.grid_value_at(socket, depth + 1));
        }
        for stored in state.layout.iter().flat_map(|layout| layout.items()) {
            total = total.saturating_add(self.item_value_at(stored, depth + 1));
        }
        total
    }

    /// Sum of member item values.
    pub fn grid_value(&self, grid: GridId) -> u64 {
        self.grid_value_at(grid, 0)
    }

    fn grid_value_at(&self, grid: GridId, depth: usize) -> u64 {
        self.grids.get(&grid).map_or(0, |grid| {
            grid.items
                .iter()
                .fold(0u64, |acc, &item| acc.saturating_add(self.item_value_at(item, depth)))
        })
    }

    pub fn container_value(&self, container: ContainerId) -> u64 {
        self.containers.get(&container).map_or(0, |container| {
            container
                .grids
                .iter()
                .filter(|grid| self.grids.get(grid).is_some_and(|grid| grid.countable))
                .fold(0u64, |acc, &grid| acc.saturating_add(self.grid_value(grid)))
        })
    }

    /// Sum over countable grids and containers. Uncounted inventories are 0.
    pub fn inventory_value(&self, inventory: InventoryId) -> u64 {
        let Some(state) = self.inventories.get(&inventory) else {
            return 0;
        };
        if !state.countable {
            return 0;
        }
        state.nodes.iter().fold(0u64, |acc, node| {
            let value = match &node.kind {
                NodeKind::Grid(grid) => {
                    if self.grids.get(grid).is_some_and(|grid| grid.countable) {
                        self.grid_value(*grid)
                    } else {
                        0
                    }
                }
                NodeKind::Container(container) => self.container_value(*container),
                NodeKind::Title(_) => 0,
            };
            acc.saturating_add(value)
        })
    }

    /// Value of the region's active inventory.
    pub fn region_value(&self, region: RegionId) -> u64 {
        self.regions
            .get(&region)
            .filter(|region| region.countable)
            .and_then(|region| region.current_inventory())
            .map_or(0, |inventory| self.inventory_value(inventory))
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::StashEngine;
    use crate::state::fixtures::*;
    use crate::state::{GridSpec, ItemCategory, StashState};

    #[test]
    fn gun_value_includes_accessories_and_rounds() {
        let (mut state, region, inventory) = stash();
        let grid = add_grid(&mut state, inventory, 6, 4);
        let gun = spawn(&mut state, &rifle());
        let optic = spawn(&mut state, &scope());
        let ammo = rounds(2);

        let mut engine = StashEngine::new(&mut state);
        engine.add_item(grid, gun, None).unwrap();
        engine.attach_accessory(gun, optic).unwrap();
        engine.load_rounds(gun, ammo.id, 2, ammo.base_value).unwrap();

        assert_eq!(state.item_value(gun), 20_000 + 4_000 + 2 * 300);
        assert_eq!(state.region_value(region), 24_600);
    }

    #[test]
    fn stack_multiplies_base_value() {
        let (mut state, _, inventory) = stash();
        let grid = add_grid(&mut state, inventory, 2, 2);
        let ammo = spawn(&mut state, &rounds(40));
        StashEngine::new(&mut state).add_item(grid, ammo, None).unwrap();

        assert_eq!(state.grid_value(grid), 12_000);
    }

    #[test]
    fn uncounted_grids_and_regions_are_excluded() {
        let (mut state, region, inventory) = stash();
        let counted = add_grid(&mut state, inventory, 2, 2);
        let hidden = add_grid_spec(&mut state, inventory, GridSpec::new(2, 2).uncounted());
        let a = spawn(&mut state, &info(1, "a", ItemCategory::Collection, 1, 1, 100));
        let b = spawn(&mut state, &info(2, "b", ItemCategory::Collection, 1, 1, 900));

        let mut engine = StashEngine::new(&mut state);
        engine.add_item(counted, a, None).unwrap();
        engine.add_item(hidden, b, None).unwrap();
        assert_eq!(state.inventory_value(inventory), 100);

        let mut spoils = StashState::new();
        let box_region = spoils.create_region("spoils", false).unwrap();
        spoils.create_inventory("box", Some(box_region)).unwrap();
        assert_eq!(spoils.region_value(box_region), 0);
        assert_eq!(state.region_value(region), 100);
    }
}
