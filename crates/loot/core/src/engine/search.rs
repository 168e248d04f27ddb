//! Search progress for loot that starts hidden.

use crate::config::EngineConfig;
use crate::state::{GridId, InventoryId, ItemId, ItemState, StateError};

use super::{StashEngine, StashEvent};

impl StashEngine<'_> {
    /// Spends `dt` seconds searching `inventory` and returns what was revealed.
    ///
    /// Items are searched one at a time: grids in node order, and within a
    /// grid by row then column. Time left over after an item is revealed
    /// carries on to the next one.
    pub fn advance_search(
        &mut self,
        inventory: InventoryId,
        dt: f32,
    ) -> Result<Vec<ItemId>, StateError> {
        let mut budget = dt.max(0.0);
        let mut revealed = Vec::new();

        for item in self.search_queue(inventory)? {
            let search = &mut self.state.item_mut(item)?.search;
            let need = search.remaining();
            if need > budget {
                search.elapsed += budget;
                break;
            }
            budget -= need;
            search.elapsed = search.seconds_required;
            search.revealed = true;

            revealed.push(item);
            self.events.push(StashEvent::Revealed { item });
        }
        Ok(revealed)
    }

    /// Hidden items of an inventory in search order.
    ///
    /// Container member grids are included, and every item is followed by
    /// whatever is mounted in its sockets.
    pub fn search_queue(&self, inventory: InventoryId) -> Result<Vec<ItemId>, StateError> {
        let mut queue = Vec::new();
        for grid in self.state.inventory_grids(inventory)? {
            self.queue_grid(grid, 0, &mut queue);
        }
        Ok(queue)
    }

    fn queue_grid(&self, grid: GridId, depth: usize, queue: &mut Vec<ItemId>) {
        let mut members: Vec<&ItemState> = self.state.items_in(grid).collect();
        members.sort_unstable_by_key(|item| (item.cell.row, item.cell.col, item.id));
        for item in members {
            if !item.is_revealed() {
                queue.push(item.id);
            }
            if depth < EngineConfig::MAX_NESTING_DEPTH {
                for socket in item.slot_grids() {
                    self.queue_grid(socket, depth + 1, queue);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::LayoutRect;
    use crate::state::fixtures::*;
    use crate::state::{Cell, ContainerSpec, ContentNode, ItemCategory, NodeKind};

    #[test]
    fn leftover_time_carries_to_the_next_item() {
        let (mut state, _, inventory) = stash();
        let grid = add_grid(&mut state, inventory, 3, 3);
        let config = EngineConfig::new();
        let slow = state
            .spawn_item(
                &info(1, "slow", ItemCategory::Collection, 1, 1, 1).with_search_seconds(1.0),
                &config,
            )
            .unwrap();
        let quick = state
            .spawn_item(
                &info(2, "quick", ItemCategory::Collection, 1, 1, 1).with_search_seconds(0.5),
                &config,
            )
            .unwrap();

        let mut engine = StashEngine::new(&mut state);
        engine.add_item(grid, quick, Some(Cell::new(0, 1))).unwrap();
        engine.add_item(grid, slow, Some(Cell::new(1, 0))).unwrap();
        assert_eq!(engine.search_queue(inventory).unwrap(), vec![slow, quick]);

        assert_eq!(engine.advance_search(inventory, 1.25).unwrap(), vec![slow]);
        assert_eq!(engine.advance_search(inventory, 0.25).unwrap(), vec![quick]);
        assert!(engine.events().contains(&StashEvent::Revealed { item: quick }));
        assert!(engine.advance_search(inventory, 5.0).unwrap().is_empty());
    }

    #[test]
    fn zero_second_items_reveal_without_time() {
        let (mut state, _, inventory) = stash();
        let grid = add_grid(&mut state, inventory, 2, 2);
        let instant = state
            .spawn_item(
                &info(1, "note", ItemCategory::Key, 1, 1, 1).with_search_seconds(0.0),
                &EngineConfig::new(),
            )
            .unwrap();

        let mut engine = StashEngine::new(&mut state);
        engine.add_item(grid, instant, None).unwrap();

        assert_eq!(engine.advance_search(inventory, 0.0).unwrap(), vec![instant]);
        assert!(state.item(instant).unwrap().is_revealed());
    }

    #[test]
    fn mounted_and_container_items_are_searched_too() {
        let (mut state, _, inventory) = stash();
        let grid = add_grid(&mut state, inventory, 2, 2);
        let pouch = state
            .create_container(
                &ContainerSpec::new("pouch", vec![LayoutRect::new(6, 3, 0.0, 0.0)]),
                Some(inventory),
            )
            .unwrap();
        state.inventory_mut(inventory).unwrap().nodes.push(ContentNode {
            key: "pouch".into(),
            kind: NodeKind::Container(pouch),
        });
        let member = state.container(pouch).unwrap().grids[0];

        let config = EngineConfig::new();
        let coin = state
            .spawn_item(&info(1, "coin", ItemCategory::Collection, 1, 1, 1), &config)
            .unwrap();
        let gun = state.spawn_item(&rifle(), &config).unwrap();
        let optic = state.spawn_item(&scope(), &config).unwrap();

        let mut engine = StashEngine::new(&mut state);
        engine.add_item(grid, coin, None).unwrap();
        engine.add_item(member, gun, None).unwrap();
        engine.attach_accessory(gun, optic).unwrap();
        assert_eq!(engine.search_queue(inventory).unwrap(), vec![coin, gun, optic]);

        let total = 3.0 * EngineConfig::DEFAULT_SEARCH_SECONDS + 0.1;
        assert_eq!(
            engine.advance_search(inventory, total).unwrap(),
            vec![coin, gun, optic]
        );
        assert!(state.item(optic).unwrap().is_revealed());
    }
}
