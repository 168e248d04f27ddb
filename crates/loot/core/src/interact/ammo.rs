//! Loading loose rounds into a gun's magazine.

use crate::engine::{StashEngine, StashEvent};
use crate::state::{AmmoLoad, InfoId, ItemCategory, ItemId, StashState};

use super::{Interaction, InteractionError};

/// Ammo of the gun's caliber loads as many rounds as the magazine has room
/// for. A full magazine still accepts the drop; the stack simply stays put.
pub(super) fn plan(state: &StashState, dragged: ItemId, target: ItemId) -> Option<Interaction> {
    let ammo = state.items.get(&dragged)?;
    let gun = state.items.get(&target)?;
    let spec = gun.gun.as_ref()?;

    if ammo.category != ItemCategory::Ammo || ammo.ammo_caliber.as_deref() != Some(&spec.caliber) {
        return None;
    }

    let room = spec.capacity.saturating_sub(gun.loaded_rounds());
    Some(Interaction::AmmoLoad {
        gun: target,
        ammo: dragged,
        kind: ammo.info,
        amount: room.min(ammo.stack.current),
    })
}

impl StashEngine<'_> {
    /// Moves `amount` rounds out of the `ammo` stack into `gun`, destroying
    /// the stack once it is empty.
    pub(crate) fn transfer_rounds(
        &mut self,
        gun: ItemId,
        ammo: ItemId,
        kind: InfoId,
        amount: u32,
    ) -> Result<(), InteractionError> {
        if amount == 0 {
            return Ok(());
        }
        let (unit_value, remaining, region) = {
            let donor = self.state_mut().item_mut(ammo)?;
            donor.stack.current = donor.stack.current.saturating_sub(amount);
            (donor.base_value, donor.stack.current, donor.region)
        };
        self.mark_dirty(region);
        self.load(gun, kind, amount, unit_value)?;

        self.record(StashEvent::StackChanged {
            item: ammo,
            current: remaining,
        });
        if remaining == 0 {
            self.destroy(ammo)?;
        }
        Ok(())
    }

    /// Loads rounds that do not come from a placed stack, e.g. from a preset.
    ///
    /// Returns how many rounds fit.
    pub fn load_rounds(
        &mut self,
        gun: ItemId,
        kind: InfoId,
        count: u32,
        unit_value: u64,
    ) -> Result<u32, InteractionError> {
        let state = self.state().item(gun)?;
        let spec = state.gun.as_ref().ok_or(InteractionError::NotAGun(gun))?;
        let amount = spec
            .capacity
            .saturating_sub(state.loaded_rounds())
            .min(count);
        let region = state.region;

        if amount > 0 {
            self.load(gun, kind, amount, unit_value)?;
        }
        self.mark_dirty(region);
        self.flush_values();
        Ok(amount)
    }

    fn load(
        &mut self,
        gun: ItemId,
        kind: InfoId,
        amount: u32,
        unit_value: u64,
    ) -> Result<(), InteractionError> {
        let target = self.state_mut().item_mut(gun)?;
        let load = target.ammo.entry(kind).or_insert(AmmoLoad {
            count: 0,
            unit_value,
        });
        load.count = load.count.saturating_add(amount);
        let rounds = target.loaded_rounds();
        let region = target.region;

        self.mark_dirty(region);
        self.record(StashEvent::AmmoLoaded { gun, rounds });
        Ok(())
    }
}
