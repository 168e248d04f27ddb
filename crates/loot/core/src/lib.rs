//! Grid inventory rules shared by every stash front end.
//!
//! `loot-core` owns the placement model (items, grids, containers, inventories,
//! regions), drop resolution, item interactions, recursive valuation, and
//! search progress. It performs no I/O and keeps no clock: pointer geometry and
//! item descriptors arrive through the oracles in [`env`], and elapsed time is
//! passed in by the caller. All state mutation flows through
//! [`engine::StashEngine`], which reports what changed as [`StashEvent`]s.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod interact;
pub mod resolve;
pub mod state;
mod value;

pub use config::EngineConfig;
pub use engine::{
    DropOutcome, DropPreview, DropTarget, PlacementError, RevertReason, StashEngine, StashEvent,
    preview_drop,
};
pub use env::{
    AccessorySlotSpec, BoundsOracle, Env, GunSpec, ItemInfo, ItemOracle, LayoutRect, OracleError,
    StashEnv,
};
pub use error::{ErrorSeverity, StashError};
pub use interact::{DropContext, Interaction, InteractionError, InteractionKind};
pub use resolve::{find_grid, grid_cell, resolve_target};
pub use state::{
    AcceptSet, Cell, CellRect, ContainerId, ContainerSpec, GridId, GridOwner, GridSpec, GridState,
    InfoId, InventoryId, InventoryState, InventoryTemplate, ItemCategory, ItemId, ItemState,
    NodeKind, NodeSpec, RegionId, RegionState, ScreenPoint, ScreenRect, StashState, StateError,
};
