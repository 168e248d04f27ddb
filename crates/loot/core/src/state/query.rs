//! Read-only placement queries: overlap sets and speculative placement search.
//!
//! Nothing here mutates state; the engine and interaction planners build on
//! these to decide what a drop would do before committing to it.

use super::{Cell, CellRect, GridId, ItemId, StashState, StateError};

impl StashState {
    /// Members of `grid` (other than `item` itself) whose rectangle intersects
    /// `item`'s footprint placed at `cell`.
    pub fn overlapping_items(
        &self,
        grid: GridId,
        item: ItemId,
        cell: Cell,
        flipped: bool,
    ) -> Result<Vec<ItemId>, StateError> {
        let target = self.grid(grid)?;
        let moving = self.item(item)?;
        let candidate = target.claimed_rect(moving.rect_at(cell, flipped));

        Ok(target
            .items
            .iter()
            .copied()
            .filter(|&member| member != item)
            .filter(|member| {
                self.items.get(member).is_some_and(|other| {
                    target.claimed_rect(other.rect()).intersects(&candidate)
                })
            })
            .collect())
    }

    /// Whether `item` could sit at `cell` given extra reservations.
    ///
    /// Members listed in `ignore` are treated as absent; `blocked` rectangles
    /// are treated as occupied. Accept filtering is not part of this check.
    pub fn fits_at(
        &self,
        grid: GridId,
        item: ItemId,
        cell: Cell,
        flipped: bool,
        ignore: &[ItemId],
        blocked: &[CellRect],
    ) -> Result<bool, StateError> {
        let target = self.grid(grid)?;
        let moving = self.item(item)?;
        if !target.check_boundary(moving, cell, flipped) {
            return Ok(false);
        }

        let candidate = target.claimed_rect(moving.rect_at(cell, flipped));
        if blocked.iter().any(|rect| rect.intersects(&candidate)) {
            return Ok(false);
        }

        let collides = target
            .items
            .iter()
            .filter(|&&member| member != item && !ignore.contains(&member))
            .filter_map(|member| self.items.get(member))
            .any(|other| target.claimed_rect(other.rect()).intersects(&candidate));
        Ok(!collides)
    }

    /// First viable cell for `item` in its current orientation, scanning rows
    /// top to bottom and columns left to right.
    pub fn try_place_item(
        &self,
        grid: GridId,
        item: ItemId,
        ignore: &[ItemId],
        blocked: &[CellRect],
    ) -> Result<Option<Cell>, StateError> {
        let target = self.grid(grid)?;
        for row in 0..i32::from(target.height) {
            for col in 0..i32::from(target.width) {
                let cell = Cell::new(col, row);
                if self.fits_at(grid, item, cell, false, ignore, blocked)? {
                    return Ok(Some(cell));
                }
            }
        }
        Ok(None)
    }

    /// Auto-placement search with no extra reservations.
    pub fn first_free_cell(&self, grid: GridId, item: ItemId) -> Result<Option<Cell>, StateError> {
        self.try_place_item(grid, item, &[], &[])
    }
}
