//! State management errors.
//!
//! Errors related to arena lookups and id allocation.

use crate::error::{ErrorSeverity, StashError};
use crate::state::{ContainerId, GridId, InventoryId, ItemId, RegionId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    #[error("unknown grid {0}")]
    UnknownGrid(GridId),

    #[error("unknown container {0}")]
    UnknownContainer(ContainerId),

    #[error("unknown inventory {0}")]
    UnknownInventory(InventoryId),

    #[error("unknown region {0}")]
    UnknownRegion(RegionId),

    /// Descriptor declares more accessory sockets than an item can carry.
    #[error("too many accessory slots (max: {max}, requested: {requested})")]
    TooManySlots { max: usize, requested: usize },

    #[error("template node '{node}' is bound to missing container '{container}'")]
    UnboundSlot { node: String, container: String },

    /// Arena id allocation overflow (all ids exhausted).
    #[error("arena id overflow (current: {current})")]
    IdOverflow { current: u32 },
}

impl StashError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            UnknownItem(_)
            | UnknownGrid(_)
            | UnknownContainer(_)
            | UnknownInventory(_)
            | UnknownRegion(_) => ErrorSeverity::Internal,
            TooManySlots { .. } | UnboundSlot { .. } => ErrorSeverity::Validation,
            IdOverflow { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            UnknownItem(_) => "STATE_UNKNOWN_ITEM",
            UnknownGrid(_) => "STATE_UNKNOWN_GRID",
            UnknownContainer(_) => "STATE_UNKNOWN_CONTAINER",
            UnknownInventory(_) => "STATE_UNKNOWN_INVENTORY",
            UnknownRegion(_) => "STATE_UNKNOWN_REGION",
            TooManySlots { .. } => "STATE_TOO_MANY_SLOTS",
            UnboundSlot { .. } => "STATE_UNBOUND_SLOT",
            IdOverflow { .. } => "STATE_ID_OVERFLOW",
        }
    }
}
