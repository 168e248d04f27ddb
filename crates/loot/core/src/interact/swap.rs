//! Position exchange between the dragged item and the items it lands on.
//!
//! Stationary items fully covered by the landing rectangle keep their offset
//! relative to the dragged item and move to its old grid, falling back to the
//! first free cell there. A single partially covered item trades cells with
//! the dragged item, with no fallback. Several items where any one is only
//! partially covered decline the swap.

use crate::engine::StashEngine;
use crate::state::{Cell, CellRect, GridId, ItemId, StashState};

use super::{DropContext, Interaction, InteractionError};

pub(super) fn plan(
    state: &StashState,
    dragged: ItemId,
    drop: &DropContext,
    targets: &[ItemId],
) -> Option<Vec<Interaction>> {
    let moving = state.items.get(&dragged)?;
    let home = moving.parent?;
    let origin = moving.cell;
    let landing_grid = state.grids.get(&drop.grid)?;
    let home_grid = state.grids.get(&home)?;

    if !landing_grid.check_accept(moving) || state.grid_within_item(drop.grid, dragged) {
        return None;
    }

    let landing = moving.rect_at(drop.cell, drop.flipped);
    let mut exchange = None;
    for &target in targets {
        let stationary = state.items.get(&target)?;
        if !landing.contains_rect(&stationary.rect()) {
            if targets.len() > 1 {
                return None;
            }
            exchange = Some(stationary.cell);
        }
    }
    let dragged_cell = exchange.unwrap_or(drop.cell);

    let mut ignore = targets.to_vec();
    ignore.push(dragged);
    if !state
        .fits_at(drop.grid, dragged, dragged_cell, drop.flipped, &ignore, &[])
        .ok()?
    {
        return None;
    }

    let mut blocked: Vec<CellRect> = Vec::new();
    if home == drop.grid {
        blocked.push(landing_grid.claimed_rect(moving.rect_at(dragged_cell, drop.flipped)));
    }

    let mut planned = Vec::with_capacity(targets.len());
    for &target in targets {
        let stationary = state.items.get(&target)?;
        if !home_grid.check_accept(stationary) || state.grid_within_item(home, target) {
            return None;
        }

        let cell = match exchange {
            Some(_) => {
                if !state.fits_at(home, target, origin, false, &ignore, &blocked).ok()? {
                    return None;
                }
                origin
            }
            None => {
                let preferred = origin.offset(stationary.cell.delta(drop.cell));
                if state
                    .fits_at(home, target, preferred, false, &ignore, &blocked)
                    .ok()?
                {
                    preferred
                } else {
                    state.try_place_item(home, target, &ignore, &blocked).ok()??
                }
            }
        };
        blocked.push(home_grid.claimed_rect(stationary.rect_at(cell, false)));

        planned.push(Interaction::PositionSwap {
            stationary: target,
            dragged_to: (drop.grid, dragged_cell),
            stationary_to: (home, cell),
        });
    }
    Some(planned)
}

impl StashEngine<'_> {
    /// Lifts the dragged item and every stationary item first, then puts the
    /// dragged item down followed by the stationary ones, so no placement
    /// collides with an item that is about to move.
    ///
    /// The dragged item must already be in its landing orientation.
    pub(crate) fn swap_positions(
        &mut self,
        dragged: ItemId,
        swaps: &[Interaction],
    ) -> Result<(), InteractionError> {
        let moves: Vec<(ItemId, (GridId, Cell), (GridId, Cell))> = swaps
            .iter()
            .filter_map(|effect| match *effect {
                Interaction::PositionSwap {
                    stationary,
                    dragged_to,
                    stationary_to,
                } => Some((stationary, dragged_to, stationary_to)),
                _ => None,
            })
            .collect();
        let Some(&(_, (grid, cell), _)) = moves.first() else {
            return Ok(());
        };

        self.detach(dragged)?;
        for &(stationary, _, _) in &moves {
            self.detach(stationary)?;
        }

        self.place(grid, dragged, Some(cell))?;
        for &(stationary, _, (to_grid, to_cell)) in &moves {
            self.place(to_grid, stationary, Some(to_cell))?;
        }
        Ok(())
    }
}
