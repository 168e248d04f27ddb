//! Plain data types stored in [`crate::state::StashState`].
mod category;
mod common;
mod container;
mod grid;
mod inventory;
mod item;
mod region;

pub use category::{AcceptSet, ItemCategory};
pub use common::{
    Cell, CellRect, ContainerId, Grade, GridId, InfoId, InventoryId, ItemId, RegionId,
    ScreenPoint, ScreenRect,
};
pub use container::{ContainerSpec, ContainerState};
pub use grid::{GridOwner, GridSpec, GridState, SlotBinding};
pub use inventory::{ContentNode, InventoryState, NodeKind, ScrollState};
pub use item::{
    AccessorySlot, AmmoLoad, CarriedLayout, CarriedSlot, ItemState, SearchState, StackCount,
    StoredItem,
};
pub use region::RegionState;
