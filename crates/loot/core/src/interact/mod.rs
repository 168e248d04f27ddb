//! Item-on-item interactions.
//!
//! Dropping an item onto occupied cells asks every stationary item what it
//! would do with the dragged one. Planning is pure: each kind lives in its own
//! module as a predicate that returns an [`Interaction`] describing the
//! effect. The engine applies effects afterwards, on a scratch copy when a
//! drop touches several items, so a declined or failing drop changes nothing.
//!
//! Priority for a single stationary item is ammo loading, then accessory
//! attach, then stack merge. Position swap is the fallback and is planned for
//! all remaining stationary items at once because their destinations depend
//! on each other.

mod accessory;
mod ammo;
mod error;
mod stack;
mod swap;

pub use error::InteractionError;

use crate::engine::StashEngine;
use crate::state::{Cell, GridId, InfoId, ItemId, StashState};

/// Effect of dropping one item onto another.
#[derive(Clone, Debug, PartialEq, Eq, strum::EnumDiscriminants)]
#[strum_discriminants(name(InteractionKind), derive(Hash, PartialOrd, Ord, strum::Display))]
#[strum_discriminants(cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize)))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interaction {
    /// Move `amount` rounds from the `ammo` stack into `gun`.
    AmmoLoad {
        gun: ItemId,
        ammo: ItemId,
        kind: InfoId,
        amount: u32,
    },
    /// Put `accessory` into the empty socket `slot` of `target`.
    AccessoryAttach {
        target: ItemId,
        accessory: ItemId,
        slot: GridId,
    },
    /// Move `amount` units from `donor` onto `target`.
    StackMerge {
        target: ItemId,
        donor: ItemId,
        amount: u32,
    },
    /// Exchange positions of the dragged item and `stationary`.
    PositionSwap {
        stationary: ItemId,
        dragged_to: (GridId, Cell),
        stationary_to: (GridId, Cell),
    },
}

impl Interaction {
    /// Stationary item this effect was planned against.
    pub fn target(&self) -> ItemId {
        match self {
            Self::AmmoLoad { gun, .. } => *gun,
            Self::AccessoryAttach { target, .. } | Self::StackMerge { target, .. } => *target,
            Self::PositionSwap { stationary, .. } => *stationary,
        }
    }

    pub fn kind(&self) -> InteractionKind {
        self.into()
    }
}

/// Where the dragged item would land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropContext {
    pub grid: GridId,
    pub cell: Cell,
    /// Footprint flipped relative to the item's current orientation.
    pub flipped: bool,
}

/// Runs the non-positional predicate chain for one stationary item.
pub fn plan(state: &StashState, dragged: ItemId, target: ItemId) -> Option<Interaction> {
    if dragged == target {
        return None;
    }
    ammo::plan(state, dragged, target)
        .or_else(|| accessory::plan(state, dragged, target))
        .or_else(|| stack::plan(state, dragged, target))
}

/// Plans a drop onto `targets`, or `None` if any of them declines.
///
/// Either every target reacts through [`plan`], or none does and they are
/// all swapped. A mix of the two is declined.
pub fn plan_drop(
    state: &StashState,
    dragged: ItemId,
    drop: &DropContext,
    targets: &[ItemId],
) -> Option<Vec<Interaction>> {
    if targets.is_empty() {
        return None;
    }
    let planned: Vec<_> = targets
        .iter()
        .map(|&target| plan(state, dragged, target))
        .collect();

    if planned.iter().all(Option::is_some) {
        return planned.into_iter().collect();
    }
    if planned.iter().any(Option::is_some) {
        return None;
    }
    swap::plan(state, dragged, drop, targets)
}

impl StashEngine<'_> {
    /// Applies planned effects in order.
    ///
    /// Merges, loads, and attachments are re-planned against the current
    /// state before each step, since an earlier step may have consumed part
    /// of the dragged stack. The chain stops once the dragged item is used up
    /// or has moved. Swaps are applied together as one group.
    pub fn apply_interactions(
        &mut self,
        dragged: ItemId,
        effects: &[Interaction],
    ) -> Result<(), InteractionError> {
        let swaps: Vec<_> = effects
            .iter()
            .filter(|effect| effect.kind() == InteractionKind::PositionSwap)
            .cloned()
            .collect();
        if !swaps.is_empty() {
            return self.swap_positions(dragged, &swaps);
        }

        let origin = self.state().item(dragged)?.parent;
        for effect in effects {
            let still_here = self
                .state()
                .items
                .get(&dragged)
                .is_some_and(|item| item.parent == origin);
            if !still_here {
                break;
            }
            let target = effect.target();
            let current = plan(self.state(), dragged, target).ok_or(InteractionError::Stale {
                kind: effect.kind(),
                dragged,
                target,
            })?;
            self.apply(dragged, &current)?;
        }
        Ok(())
    }

    fn apply(&mut self, dragged: ItemId, effect: &Interaction) -> Result<(), InteractionError> {
        match *effect {
            Interaction::AmmoLoad {
                gun,
                ammo,
                kind,
                amount,
            } => self.transfer_rounds(gun, ammo, kind, amount),
            Interaction::AccessoryAttach {
                accessory, slot, ..
            } => self.mount(slot, accessory),
            Interaction::StackMerge {
                target,
                donor,
                amount,
            } => self.merge_stacks(target, donor, amount),
            Interaction::PositionSwap { .. } => {
                self.swap_positions(dragged, core::slice::from_ref(effect))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::*;
    use crate::state::ItemCategory;

    #[test]
    fn ammo_takes_priority_over_stacking() {
        let (mut state, _, inventory) = stash();
        let grid = add_grid(&mut state, inventory, 8, 4);
        let gun = spawn(&mut state, &rifle());
        let ammo = spawn(&mut state, &rounds(10));
        {
            let mut engine = StashEngine::new(&mut state);
            engine.add_item(grid, gun, None).unwrap();
            engine.add_item(grid, ammo, None).unwrap();
        }

        let effect = plan(&state, ammo, gun).unwrap();
        assert_eq!(effect.kind(), InteractionKind::AmmoLoad);
        assert_eq!(effect.kind().to_string(), "AmmoLoad");
    }

    #[test]
    fn unrelated_items_fall_through_to_swap() {
        let (mut state, _, inventory) = stash();
        let grid = add_grid(&mut state, inventory, 4, 4);
        let helmet = spawn(&mut state, &info(1, "helmet", ItemCategory::Helmet, 2, 2, 1));
        let salt = spawn(&mut state, &info(2, "salt", ItemCategory::Consume, 1, 1, 1));
        {
            let mut engine = StashEngine::new(&mut state);
            engine.add_item(grid, helmet, None).unwrap();
            engine.add_item(grid, salt, Some(Cell::new(3, 3))).unwrap();
        }

        assert_eq!(plan(&state, salt, helmet), None);
        assert_eq!(plan(&state, salt, salt), None);
    }

    #[test]
    fn mixed_reactions_decline_the_drop() {
        let (mut state, _, inventory) = stash();
        let grid = add_grid(&mut state, inventory, 8, 4);
        let gun = spawn(&mut state, &rifle());
        let helmet = spawn(&mut state, &info(1, "helmet", ItemCategory::Helmet, 1, 1, 1));
        let ammo = spawn(&mut state, &rounds(10));
        {
            let mut engine = StashEngine::new(&mut state);
            engine.add_item(grid, gun, Some(Cell::ORIGIN)).unwrap();
            engine.add_item(grid, helmet, Some(Cell::new(4, 0))).unwrap();
            engine.add_item(grid, ammo, Some(Cell::new(7, 3))).unwrap();
        }

        let drop = DropContext {
            grid,
            cell: Cell::new(3, 0),
            flipped: false,
        };
        assert_eq!(plan_drop(&state, ammo, &drop, &[gun, helmet]), None);
    }
}
