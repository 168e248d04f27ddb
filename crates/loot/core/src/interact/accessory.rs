//! Mounting accessories into weapon sockets.

use crate::engine::StashEngine;
use crate::state::{Cell, GridId, ItemId, StashState};

use super::{Interaction, InteractionError};

/// First empty socket of `target` whose accept set admits the dragged item.
pub(super) fn plan(state: &StashState, dragged: ItemId, target: ItemId) -> Option<Interaction> {
    let accessory = state.items.get(&dragged)?;
    let host = state.items.get(&target)?;

    let slot = host.slot_grids().find(|&grid| {
        state
            .grids
            .get(&grid)
            .is_some_and(|socket| socket.is_empty() && socket.check_accept(accessory))
    })?;
    if state.grid_within_item(slot, dragged) {
        return None;
    }

    Some(Interaction::AccessoryAttach {
        target,
        accessory: dragged,
        slot,
    })
}

impl StashEngine<'_> {
    pub(crate) fn mount(&mut self, slot: GridId, accessory: ItemId) -> Result<(), InteractionError> {
        self.place(slot, accessory, Some(Cell::ORIGIN))?;
        Ok(())
    }

    /// Mounts `accessory` on `target` without a drag, e.g. from a preset.
    pub fn attach_accessory(
        &mut self,
        target: ItemId,
        accessory: ItemId,
    ) -> Result<GridId, InteractionError> {
        let Some(Interaction::AccessoryAttach { slot, .. }) = plan(self.state(), accessory, target)
        else {
            return Err(InteractionError::Declined {
                dragged: accessory,
                target,
            });
        };
        self.mount(slot, accessory)?;
        self.flush_values();
        Ok(slot)
    }
}
