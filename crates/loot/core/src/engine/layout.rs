//! Equip-slot side effects: moving a carried layout between an item and the
//! container its slot is bound to.

use crate::state::{
    CarriedLayout, CarriedSlot, ContainerId, GridId, ItemId, StateError, StoredItem,
};

use super::{PlacementError, StashEngine, StashEvent};

impl StashEngine<'_> {
    /// Moves `item`'s carried layout into `container`.
    ///
    /// The container's current grids are discarded first. Stored contents
    /// are re-attached at their recorded cells. Anything that was sitting in
    /// the discarded grids is moved into the new layout, then anywhere else
    /// in the owning inventory; what fits nowhere is destroyed.
    pub(crate) fn install_layout(
        &mut self,
        item: ItemId,
        container: ContainerId,
    ) -> Result<(), StateError> {
        let Some(layout) = self.state.item_mut(item)?.layout.take() else {
            return Ok(());
        };

        let displaced = self.clear_container(container)?;
        let region = self.state.item(item)?.region;

        for slot in layout.slots {
            let grid = self.state.push_container_grid(container, slot.rect)?;
            for stored in slot.contents {
                self.restore(grid, stored)?;
            }
        }

        self.state.container_mut(container)?.carried_by = Some(item);
        self.events
            .push(StashEvent::LayoutInstalled { item, container });
        self.mark_dirty(region);

        for loose in displaced {
            self.rehome(container, loose)?;
        }
        Ok(())
    }

    /// Snapshots the contents of `container` back onto `item` and restores
    /// the container's default layout.
    ///
    /// Does nothing unless `item` is the carrier currently installed.
    pub(crate) fn store_layout(
        &mut self,
        item: ItemId,
        container: ContainerId,
    ) -> Result<(), StateError> {
        if self.state.container(container)?.carried_by != Some(item) {
            return Ok(());
        }

        let (grids, rects) = {
            let state = self.state.container_mut(container)?;
            state.carried_by = None;
            (
                core::mem::take(&mut state.grids),
                core::mem::take(&mut state.layout),
            )
        };

        let mut layout = CarriedLayout::default();
        for (grid, rect) in grids.into_iter().zip(rects) {
            let removed = self
                .state
                .grids
                .remove(&grid)
                .ok_or(StateError::UnknownGrid(grid))?;
            let mut contents = Vec::with_capacity(removed.items.len());
            for member in removed.items {
                let stored = self.state.item_mut(member)?;
                stored.parent = None;
                contents.push(StoredItem {
                    item: member,
                    cell: stored.cell,
                });
            }
            layout.slots.push(CarriedSlot { rect, contents });
        }
        self.state.item_mut(item)?.layout = Some(layout);

        let defaults = self.state.container(container)?.default_layout.clone();
        for rect in defaults {
            self.state.push_container_grid(container, rect)?;
        }

        self.events.push(StashEvent::LayoutStored { item, container });
        Ok(())
    }

    /// Removes every member grid of `container`. Returns the items that were
    /// in them, now loose.
    fn clear_container(&mut self, container: ContainerId) -> Result<Vec<ItemId>, StateError> {
        let grids = {
            let state = self.state.container_mut(container)?;
            state.layout.clear();
            core::mem::take(&mut state.grids)
        };
        let mut displaced = Vec::new();
        for grid in grids {
            let Some(removed) = self.state.grids.remove(&grid) else {
                continue;
            };
            for member in removed.items {
                let loose = self.state.item_mut(member)?;
                loose.parent = None;
                let region = loose.region;
                loose.region = None;
                self.mark_dirty(region);
                self.events.push(StashEvent::DraggedOut { item: member, grid });
                displaced.push(member);
            }
        }
        Ok(displaced)
    }

    /// Finds a new grid for an item pushed out by a layout swap.
    fn rehome(&mut self, container: ContainerId, item: ItemId) -> Result<(), StateError> {
        let owner = self.state.container(container)?.owner;
        let mut placed = self.place_in_container(container, item);
        if let (Ok(None), Some(inventory)) = (&placed, owner) {
            placed = self.place_in_inventory(inventory, item);
        }
        match placed {
            Ok(Some(_)) => Ok(()),
            Err(PlacementError::State(err)) => Err(err),
            Ok(None) | Err(_) => self.destroy(item),
        }
    }

    /// Re-attaches a stored item without re-running placement checks; its
    /// cell was valid when the layout was snapshotted.
    fn restore(&mut self, grid: GridId, stored: StoredItem) -> Result<(), StateError> {
        self.state.grid_mut(grid)?.items.push(stored.item);
        let item = self.state.item_mut(stored.item)?;
        item.parent = Some(grid);
        item.cell = stored.cell;

        let item = self.state.item(stored.item)?;
        let pixel_size = self.state.grid(grid)?.pixel_size(item);
        self.events.push(StashEvent::Placed {
            item: stored.item,
            grid,
            cell: stored.cell,
            rotated: item.rotated,
            pixel_size,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::{StashEngine, StashEvent};
    use crate::env::LayoutRect;
    use crate::state::fixtures::*;
    use crate::state::{
        AcceptSet, Cell, ContainerSpec, GridSpec, InventoryTemplate, ItemCategory, NodeKind,
        NodeSpec, StashState,
    };

    fn backpack() -> crate::env::ItemInfo {
        info(20, "Pilgrim", ItemCategory::Backpack, 5, 7, 30_000).with_layout(vec![
            LayoutRect::new(5, 3, 0.0, 0.0),
            LayoutRect::new(2, 2, 0.0, 3.0),
        ])
    }

    fn loadout() -> (StashState, crate::state::InventoryId) {
        let mut state = StashState::new();
        let region = state.create_region("player", true).unwrap();
        let inventory = InventoryTemplate::player_loadout()
            .instantiate(&mut state, Some(region))
            .unwrap();
        (state, inventory)
    }

    fn node_grid(state: &StashState, inventory: crate::state::InventoryId, key: &str) -> crate::state::GridId {
        match state.inventory(inventory).unwrap().node(key) {
            Some(NodeKind::Grid(grid)) => *grid,
            _ => panic!("{key} is not a grid"),
        }
    }

    fn node_container(
        state: &StashState,
        inventory: crate::state::InventoryId,
        key: &str,
    ) -> crate::state::ContainerId {
        match state.inventory(inventory).unwrap().node(key) {
            Some(NodeKind::Container(container)) => *container,
            _ => panic!("{key} is not a container"),
        }
    }

    #[test]
    fn equip_installs_and_unequip_restores_contents() {
        let (mut state, inventory) = loadout();
        let slot = node_grid(&state, inventory, InventoryTemplate::BACKPACK);
        let container = node_container(&state, inventory, InventoryTemplate::BACKPACK_CONTAINER);
        let stash_grid = add_grid(&mut state, inventory, 10, 10);
        let pack = spawn(&mut state, &backpack());
        let loot = spawn(&mut state, &info(1, "GPU", ItemCategory::Collection, 2, 1, 100_000));

        let mut engine = StashEngine::new(&mut state);
        engine.add_item(slot, pack, None).unwrap();
        let grids = engine.state().container(container).unwrap().grids.clone();
        assert_eq!(grids.len(), 2);
        engine.add_item(grids[0], loot, Some(Cell::new(3, 2))).unwrap();

        engine.add_item(stash_grid, pack, None).unwrap();
        let events = engine.into_events();
        assert!(events.contains(&StashEvent::LayoutInstalled { item: pack, container }));
        assert!(events.contains(&StashEvent::LayoutStored { item: pack, container }));

        assert!(state.container(container).unwrap().grids.is_empty());
        assert!(!state.grids.contains_key(&grids[0]));
        assert_eq!(state.item(loot).unwrap().parent, None);
        let layout = state.item(pack).unwrap().layout.clone().unwrap();
        assert_eq!(layout.slots[0].contents[0].cell, Cell::new(3, 2));

        let mut engine = StashEngine::new(&mut state);
        engine.add_item(slot, pack, None).unwrap();
        let grids = state.container(container).unwrap().grids.clone();
        assert_eq!(state.item(loot).unwrap().parent, Some(grids[0]));
        assert_eq!(state.item(loot).unwrap().cell, Cell::new(3, 2));
        assert_eq!(state.container(container).unwrap().carried_by, Some(pack));
    }

    #[test]
    fn items_in_replaced_default_grids_are_moved_not_lost() {
        let template = InventoryTemplate {
            title: "rig".into(),
            nodes: vec![
                NodeSpec::Grid {
                    key: "stash".into(),
                    grid: GridSpec::new(1, 1),
                },
                NodeSpec::EquipSlot {
                    key: "slot".into(),
                    grid: GridSpec::socket(AcceptSet::only([ItemCategory::Backpack])),
                    container: "sling".into(),
                },
                NodeSpec::Container {
                    key: "sling".into(),
                    container: ContainerSpec::new("Sling", vec![LayoutRect::new(3, 1, 0.0, 0.0)]),
                },
            ],
        };
        let mut state = StashState::new();
        let region = state.create_region("player", true).unwrap();
        let inventory = template.instantiate(&mut state, Some(region)).unwrap();
        let stash = node_grid(&state, inventory, "stash");
        let slot = node_grid(&state, inventory, "slot");
        let sling = node_container(&state, inventory, "sling");
        let default_grid = state.container(sling).unwrap().grids[0];

        let pouch = info(21, "Pouch", ItemCategory::Backpack, 2, 2, 1_000)
            .with_layout(vec![LayoutRect::new(1, 1, 0.0, 0.0)]);
        let pouch = spawn(&mut state, &pouch);
        let [a, b, c] = [1, 2, 3].map(|id| {
            spawn(&mut state, &info(id, "coin", ItemCategory::Collection, 1, 1, 10))
        });

        let mut engine = StashEngine::new(&mut state);
        for (col, item) in [a, b, c].into_iter().enumerate() {
            engine
                .add_item(default_grid, item, Some(Cell::new(col as i32, 0)))
                .unwrap();
        }
        engine.drain_events();
        engine.add_item(slot, pouch, None).unwrap();
        let events = engine.into_events();

        let installed = state.container(sling).unwrap().grids.clone();
        assert_eq!(installed.len(), 1);
        assert_eq!(state.item(a).unwrap().parent, Some(installed[0]));
        assert_eq!(state.item(b).unwrap().parent, Some(stash));
        assert_eq!(state.item(b).unwrap().region, Some(region));
        assert!(!state.items.contains_key(&c));
        assert!(events.contains(&StashEvent::Destroyed { item: c }));
        assert_eq!(state.region_value(region), 1_000 + 10 + 10);
    }

    #[test]
    fn stored_contents_count_toward_the_carrier() {
        let (mut state, inventory) = loadout();
        let slot = node_grid(&state, inventory, InventoryTemplate::BACKPACK);
        let container = node_container(&state, inventory, InventoryTemplate::BACKPACK_CONTAINER);
        let pack = spawn(&mut state, &backpack());
        let loot = spawn(&mut state, &info(1, "GPU", ItemCategory::Collection, 2, 1, 100_000));

        let mut engine = StashEngine::new(&mut state);
        engine.add_item(slot, pack, None).unwrap();
        let inner = engine.state().container(container).unwrap().grids[1];
        engine.add_item(inner, loot, None).unwrap();
        engine.remove_item(slot, pack, false).unwrap();

        assert_eq!(state.item_value(pack), 130_000);
    }

    #[test]
    fn carrier_cannot_be_dropped_into_its_own_layout() {
        let (mut state, inventory) = loadout();
        let slot = node_grid(&state, inventory, InventoryTemplate::BACKPACK);
        let container = node_container(&state, inventory, InventoryTemplate::BACKPACK_CONTAINER);
        let pack = spawn(&mut state, &backpack());

        let mut engine = StashEngine::new(&mut state);
        engine.add_item(slot, pack, None).unwrap();
        let inner = engine.state().container(container).unwrap().grids[0];

        assert!(matches!(
            engine.add_item(inner, pack, None),
            Err(crate::engine::PlacementError::WouldContainItself { .. })
        ));
        assert_eq!(state.item(pack).unwrap().parent, Some(slot));
    }

    #[test]
    fn destroying_an_equipped_carrier_destroys_its_contents() {
        let (mut state, inventory) = loadout();
        let slot = node_grid(&state, inventory, InventoryTemplate::BACKPACK);
        let container = node_container(&state, inventory, InventoryTemplate::BACKPACK_CONTAINER);
        let pack = spawn(&mut state, &backpack());
        let loot = spawn(&mut state, &info(1, "GPU", ItemCategory::Collection, 2, 1, 100_000));

        let mut engine = StashEngine::new(&mut state);
        engine.add_item(slot, pack, None).unwrap();
        let inner = engine.state().container(container).unwrap().grids[0];
        engine.add_item(inner, loot, None).unwrap();
        engine.destroy_item(pack).unwrap();

        assert!(!state.items.contains_key(&loot));
        assert!(state.container(container).unwrap().grids.is_empty());
    }
}
