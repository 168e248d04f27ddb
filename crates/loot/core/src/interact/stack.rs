use crate::engine::{StashEngine, StashEvent};
use crate::state::{ItemId, StashState};

use super::{Interaction, InteractionError};

/// Same-named stacks merge while the target has room.
pub(super) fn plan(state: &StashState, dragged: ItemId, target: ItemId) -> Option<Interaction> {
    let donor = state.items.get(&dragged)?;
    let host = state.items.get(&target)?;
    if donor.name != host.name || host.stack.is_full() {
        return None;
    }

    Some(Interaction::StackMerge {
        target,
        donor: dragged,
        amount: host.stack.room().min(donor.stack.current),
    })
}

impl StashEngine<'_> {
    pub(crate) fn merge_stacks(
        &mut self,
        target: ItemId,
        donor: ItemId,
        amount: u32,
    ) -> Result<(), InteractionError> {
        let (current, region) = {
            let host = self.state_mut().item_mut(target)?;
            host.stack.current = host.stack.current.saturating_add(amount).min(host.stack.max);
            (host.stack.current, host.region)
        };
        self.mark_dirty(region);
        self.record(StashEvent::StackChanged {
            item: target,
            current,
        });

        let (left, region) = {
            let giver = self.state_mut().item_mut(donor)?;
            giver.stack.current = giver.stack.current.saturating_sub(amount);
            (giver.stack.current, giver.region)
        };
        self.mark_dirty(region);
        self.record(StashEvent::StackChanged {
            item: donor,
            current: left,
        });
        if left == 0 {
            self.destroy(donor)?;
        }
        Ok(())
    }
}
