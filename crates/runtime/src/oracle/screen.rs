//! [`loot_core::BoundsOracle`] fed by the presentation layer.
use std::collections::HashMap;

use loot_core::{BoundsOracle, GridId, ScreenRect};

/// Last reported on-screen rectangle of every visible grid.
#[derive(Clone, Debug, Default)]
pub struct ScreenLayout {
    bounds: HashMap<GridId, ScreenRect>,
}

impl ScreenLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bounds(&mut self, grid: GridId, rect: ScreenRect) {
        self.bounds.insert(grid, rect);
    }

    /// Forgets a grid, e.g. when its panel scrolls out of view.
    pub fn clear_bounds(&mut self, grid: GridId) {
        self.bounds.remove(&grid);
    }

    /// Drops grids that no longer exist in the stash.
    pub fn retain(&mut self, mut keep: impl FnMut(GridId) -> bool) {
        self.bounds.retain(|&grid, _| keep(grid));
    }
}

impl BoundsOracle for ScreenLayout {
    fn grid_bounds(&self, grid: GridId) -> Option<ScreenRect> {
        self.bounds.get(&grid).copied()
    }
}
