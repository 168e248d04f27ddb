//! Pointer resolution: global screen position to grid and cell.
//!
//! Screen geometry comes from a [`BoundsOracle`]; the core never stores pixel
//! positions of its own.

use crate::engine::DropTarget;
use crate::env::{BoundsOracle, Env, ItemOracle, OracleError};
use crate::state::{Cell, GridId, GridState, ItemId, ScreenPoint, ScreenRect, StashState};

/// First targetable grid, in id order, whose on-screen rectangle contains
/// `point`. Edges count as inside. Grids that live inside `dragged` are
/// skipped so an item can never be dropped into itself.
pub fn find_grid<B>(
    state: &StashState,
    bounds: &B,
    point: ScreenPoint,
    dragged: Option<ItemId>,
) -> Option<(GridId, ScreenRect)>
where
    B: BoundsOracle + ?Sized,
{
    state
        .grids
        .keys()
        .copied()
        .filter(|&grid| state.is_targetable(grid))
        .filter(|&grid| dragged.is_none_or(|item| !state.grid_within_item(grid, item)))
        .find_map(|grid| {
            bounds
                .grid_bounds(grid)
                .filter(|rect| rect.contains(point))
                .map(|rect| (grid, rect))
        })
}

/// Cell under `point` for an item of `footprint` held by its center.
///
/// Rounds to the nearest cell and clamps so the footprint stays inside the
/// grid. Sockets always resolve to the origin.
pub fn grid_cell(grid: &GridState, rect: ScreenRect, point: ScreenPoint, footprint: (u16, u16)) -> Cell {
    if grid.fullfill {
        return Cell::ORIGIN;
    }
    let (width, height) = footprint;
    let column = grid.cell_size * grid.aspect;

    let col = round_half_up(
        (point.x - rect.x - f32::from(width) * column / 2.0) / column,
    );
    let row = round_half_up(
        (point.y - rect.y - f32::from(height) * grid.cell_size / 2.0) / grid.cell_size,
    );

    let max_col = (i32::from(grid.width) - i32::from(width)).max(0);
    let max_row = (i32::from(grid.height) - i32::from(height)).max(0);
    Cell::new(col.clamp(0, max_col), row.clamp(0, max_row))
}

fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

/// Resolves a pointer release for `item` into a drop target.
///
/// `Ok(None)` means the pointer is outside every targetable grid.
///
/// # Errors
///
/// Returns `OracleError::BoundsNotAvailable` if `env` carries no bounds oracle.
pub fn resolve_target<I, B>(
    state: &StashState,
    env: &Env<'_, I, B>,
    item: ItemId,
    point: ScreenPoint,
    flipped: bool,
) -> Result<Option<DropTarget>, OracleError>
where
    I: ItemOracle + ?Sized,
    B: BoundsOracle + ?Sized,
{
    let bounds = env.bounds()?;
    let Some((grid, rect)) = find_grid(state, bounds, point, Some(item)) else {
        return Ok(None);
    };
    let (Some(target), Some(moving)) = (state.grids.get(&grid), state.items.get(&item)) else {
        return Ok(None);
    };
    let cell = grid_cell(target, rect, point, moving.footprint(flipped));
    Ok(Some(DropTarget::new(grid, cell)))
}
