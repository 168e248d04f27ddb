use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::EngineConfig;
use crate::env::{GunSpec, LayoutRect};

use super::{Cell, CellRect, Grade, GridId, InfoId, ItemCategory, ItemId, RegionId};

/// A live item instance.
///
/// `width`/`height` describe the current orientation; rotating swaps them and
/// flips `rotated`. `parent` is the single owning grid, `region` a weak
/// back-reference used only to route value updates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub id: ItemId,
    pub info: InfoId,
    pub name: String,
    pub category: ItemCategory,
    pub grade: Grade,
    pub width: u16,
    pub height: u16,
    pub rotated: bool,
    pub cell: Cell,
    pub base_value: u64,
    pub stack: StackCount,
    pub slots: ArrayVec<AccessorySlot, { EngineConfig::MAX_ACCESSORY_SLOTS }>,
    pub gun: Option<GunSpec>,
    pub ammo_caliber: Option<String>,
    /// Loaded rounds keyed by the ammo descriptor they came from.
    pub ammo: BTreeMap<InfoId, AmmoLoad>,
    /// Internal layout of a backpack or chest rig while it is not equipped.
    pub layout: Option<CarriedLayout>,
    pub search: SearchState,
    pub parent: Option<GridId>,
    pub region: Option<RegionId>,
}

impl ItemState {
    /// Footprint in cells, optionally flipped relative to the current orientation.
    pub const fn footprint(&self, flipped: bool) -> (u16, u16) {
        if flipped {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    pub const fn rect(&self) -> CellRect {
        CellRect::at(self.cell, self.width, self.height)
    }

    pub const fn rect_at(&self, cell: Cell, flipped: bool) -> CellRect {
        let (width, height) = self.footprint(flipped);
        CellRect::at(cell, width, height)
    }

    /// Rotates by 90 degrees by swapping the footprint.
    pub fn rotate(&mut self) {
        core::mem::swap(&mut self.width, &mut self.height);
        self.rotated = !self.rotated;
    }

    pub fn slot_grids(&self) -> impl Iterator<Item = GridId> + '_ {
        self.slots.iter().map(|slot| slot.grid)
    }

    pub fn loaded_rounds(&self) -> u32 {
        self.ammo.values().map(|load| load.count).sum()
    }

    pub const fn is_revealed(&self) -> bool {
        self.search.revealed
    }

    pub const fn is_placed(&self) -> bool {
        self.parent.is_some()
    }
}

/// Current and maximum stack count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackCount {
    pub current: u32,
    pub max: u32,
}

impl StackCount {
    pub const fn new(current: u32, max: u32) -> Self {
        Self { current, max }
    }

    pub const fn room(&self) -> u32 {
        self.max.saturating_sub(self.current)
    }

    pub const fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

/// Accessory socket backed by a single-occupant grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessorySlot {
    pub name: String,
    pub grid: GridId,
}

/// Rounds of one ammo kind held inside a gun.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmoLoad {
    pub count: u32,
    pub unit_value: u64,
}

/// Layout descriptor owned by an unequipped backpack or chest rig.
///
/// Ownership moves into the container it is equipped into and back out again
/// on unequip; contents keep their cells across the round trip.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarriedLayout {
    pub slots: Vec<CarriedSlot>,
}

impl CarriedLayout {
    pub fn from_rects(rects: &[LayoutRect]) -> Self {
        Self {
            slots: rects
                .iter()
                .map(|rect| CarriedSlot {
                    rect: *rect,
                    contents: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.slots
            .iter()
            .flat_map(|slot| slot.contents.iter().map(|stored| stored.item))
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarriedSlot {
    pub rect: LayoutRect,
    pub contents: Vec<StoredItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoredItem {
    pub item: ItemId,
    pub cell: Cell,
}

/// Search progress gating whether an item's details are visible.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchState {
    pub seconds_required: f32,
    pub elapsed: f32,
    pub revealed: bool,
}

impl SearchState {
    pub const fn revealed() -> Self {
        Self {
            seconds_required: 0.0,
            elapsed: 0.0,
            revealed: true,
        }
    }

    pub const fn hidden(seconds_required: f32) -> Self {
        Self {
            seconds_required,
            elapsed: 0.0,
            revealed: false,
        }
    }

    pub fn remaining(&self) -> f32 {
        if self.revealed {
            0.0
        } else {
            (self.seconds_required - self.elapsed).max(0.0)
        }
    }

    pub fn progress(&self) -> f32 {
        if self.revealed || self.seconds_required <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.seconds_required).clamp(0.0, 1.0)
        }
    }
}
