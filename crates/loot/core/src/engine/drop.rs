//! Drop resolution: what happens when a dragged item is released over a grid.

use crate::interact::{self, DropContext, Interaction, InteractionError, InteractionKind};
use crate::state::{Cell, GridId, ItemId, StashState, StateError};

use super::{PlacementError, StashEngine};

/// Grid cell a pointer release resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropTarget {
    pub grid: GridId,
    pub cell: Cell,
}

impl DropTarget {
    pub const fn new(grid: GridId, cell: Cell) -> Self {
        Self { grid, cell }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RevertReason {
    /// Released outside every grid.
    NoTarget,
    /// Grid belongs to a disabled inventory.
    Untargetable,
    /// Item has not been revealed by searching yet.
    Hidden,
    /// Neither orientation passes the accept and boundary checks.
    Rejected,
    /// At least one overlapped item did not accept the drop.
    InteractionDeclined,
    /// Applying the planned interaction failed; nothing was changed.
    InteractionFailed,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropOutcome {
    Placed {
        grid: GridId,
        cell: Cell,
        rotated: bool,
    },
    Interacted {
        kinds: Vec<InteractionKind>,
    },
    /// The item stays exactly where it was before the drag.
    Reverted(RevertReason),
}

impl DropOutcome {
    pub fn is_reverted(&self) -> bool {
        matches!(self, Self::Reverted(_))
    }
}

/// Answer for hover feedback while dragging.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropPreview {
    /// Free cells; `flip` is true when the item lands rotated from its
    /// current orientation.
    Place { flip: bool },
    Interact(Vec<InteractionKind>),
    Reject(RevertReason),
}

/// Decision reached before any mutation.
enum Decision {
    Place { target: DropTarget, flip: bool },
    Interact { effects: Vec<Interaction>, flip: bool },
    Reject(RevertReason),
}

/// Decides what a drop would do. The user's current orientation is tried
/// first, then the flipped one.
fn decide(
    state: &StashState,
    item: ItemId,
    target: Option<DropTarget>,
    flipped: bool,
) -> Result<Decision, StateError> {
    let Some(target) = target else {
        return Ok(Decision::Reject(RevertReason::NoTarget));
    };
    let moving = state.item(item)?;
    let grid = state.grid(target.grid)?;

    if !moving.is_revealed() {
        return Ok(Decision::Reject(RevertReason::Hidden));
    }
    if !state.is_targetable(target.grid) {
        return Ok(Decision::Reject(RevertReason::Untargetable));
    }
    if state.grid_within_item(target.grid, item) {
        return Ok(Decision::Reject(RevertReason::Rejected));
    }

    let orientations = [flipped, !flipped];
    let mut overlaps = Vec::with_capacity(orientations.len());
    for flip in orientations {
        overlaps.push((
            flip,
            state.overlapping_items(target.grid, item, target.cell, flip)?,
        ));
    }

    if overlaps.iter().any(|(_, set)| set.is_empty()) {
        let placeable = overlaps.iter().find(|(flip, set)| {
            set.is_empty()
                && grid.check_accept(moving)
                && grid.check_boundary(moving, target.cell, *flip)
        });
        return Ok(match placeable {
            Some(&(flip, _)) => Decision::Place { target, flip },
            None => Decision::Reject(RevertReason::Rejected),
        });
    }

    for (flip, set) in &overlaps {
        let context = DropContext {
            grid: target.grid,
            cell: target.cell,
            flipped: *flip,
        };
        if let Some(effects) = interact::plan_drop(state, item, &context, set) {
            return Ok(Decision::Interact {
                effects,
                flip: *flip,
            });
        }
    }
    Ok(Decision::Reject(RevertReason::InteractionDeclined))
}

/// Read-only counterpart of [`StashEngine::resolve_drop`].
pub fn preview_drop(
    state: &StashState,
    item: ItemId,
    target: Option<DropTarget>,
    flipped: bool,
) -> Result<DropPreview, StateError> {
    Ok(match decide(state, item, target, flipped)? {
        Decision::Place { flip, .. } => DropPreview::Place { flip },
        Decision::Interact { effects, .. } => {
            DropPreview::Interact(effects.iter().map(Interaction::kind).collect())
        }
        Decision::Reject(reason) => DropPreview::Reject(reason),
    })
}

impl StashEngine<'_> {
    /// Resolves a pointer release.
    ///
    /// `flipped` is the orientation toggle the user applied while dragging.
    /// Placement, interaction, and revert all end with a value refresh of the
    /// item's region.
    pub fn resolve_drop(
        &mut self,
        item: ItemId,
        target: Option<DropTarget>,
        flipped: bool,
    ) -> Result<DropOutcome, StateError> {
        let region = self.state.item(item)?.region;
        let outcome = match decide(self.state(), item, target, flipped)? {
            Decision::Place { target, flip } => self.drop_place(item, target, flip)?,
            Decision::Interact { effects, flip } => self.drop_interact(item, effects, flip)?,
            Decision::Reject(reason) => DropOutcome::Reverted(reason),
        };
        self.mark_dirty(region);
        self.flush_values();
        Ok(outcome)
    }

    fn drop_place(
        &mut self,
        item: ItemId,
        target: DropTarget,
        flip: bool,
    ) -> Result<DropOutcome, StateError> {
        if flip {
            self.state.item_mut(item)?.rotate();
        }
        match self.place(target.grid, item, Some(target.cell)) {
            Ok(cell) => Ok(DropOutcome::Placed {
                grid: target.grid,
                cell,
                rotated: self.state.item(item)?.rotated,
            }),
            Err(PlacementError::State(err)) => Err(err),
            Err(_) => {
                if flip {
                    self.state.item_mut(item)?.rotate();
                }
                Ok(DropOutcome::Reverted(RevertReason::Rejected))
            }
        }
    }

    /// Applies effects to a scratch copy and commits only if all succeed.
    fn drop_interact(
        &mut self,
        item: ItemId,
        effects: Vec<Interaction>,
        flip: bool,
    ) -> Result<DropOutcome, StateError> {
        let kinds: Vec<_> = effects.iter().map(Interaction::kind).collect();
        let swapping = kinds.contains(&InteractionKind::PositionSwap);

        let mut scratch = self.state.clone();
        let (result, events, dirty) = {
            let mut nested = StashEngine::new(&mut scratch);
            if swapping && flip {
                nested.state.item_mut(item)?.rotate();
            }
            let result = nested.apply_interactions(item, &effects);
            (result, nested.events, nested.dirty)
        };

        match result {
            Ok(()) => {
                *self.state = scratch;
                self.events.extend(events);
                self.dirty.extend(dirty);
                Ok(DropOutcome::Interacted { kinds })
            }
            Err(InteractionError::State(err)) => Err(err),
            Err(_) => Ok(DropOutcome::Reverted(RevertReason::InteractionFailed)),
        }
    }
}
