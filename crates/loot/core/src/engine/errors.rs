//! Error types for placement operations.

use crate::error::{ErrorSeverity, StashError};
use crate::state::{Cell, GridId, ItemCategory, ItemId, StateError};

/// Reasons a grid, container, inventory, or region refused an item.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementError {
    #[error("{grid} does not accept {item} of category '{category}'")]
    Rejected {
        item: ItemId,
        grid: GridId,
        category: ItemCategory,
    },

    #[error("{item} does not fit inside {grid} at {cell}")]
    OutOfBounds {
        item: ItemId,
        grid: GridId,
        cell: Cell,
    },

    #[error("{item} at {cell} of {grid} overlaps {with}")]
    Overlap {
        item: ItemId,
        grid: GridId,
        cell: Cell,
        with: ItemId,
    },

    #[error("no free cell for {item} in {grid}")]
    NoFreeCell { item: ItemId, grid: GridId },

    /// Composite targets (container, inventory, region) had no grid with room.
    #[error("no grid has room for {item}")]
    NoRoom { item: ItemId },

    #[error("{item} cannot be placed into {grid}, which lies inside it")]
    WouldContainItself { item: ItemId, grid: GridId },

    #[error("{item} is not a member of {grid}")]
    NotInGrid { item: ItemId, grid: GridId },

    #[error(transparent)]
    State(#[from] StateError),
}

impl StashError for PlacementError {
    fn severity(&self) -> ErrorSeverity {
        use PlacementError::*;
        match self {
            Overlap { .. } | NoFreeCell { .. } | NoRoom { .. } => ErrorSeverity::Recoverable,
            Rejected { .. } | OutOfBounds { .. } | WouldContainItself { .. } => {
                ErrorSeverity::Validation
            }
            NotInGrid { .. } => ErrorSeverity::Internal,
            State(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use PlacementError::*;
        match self {
            Rejected { .. } => "PLACEMENT_REJECTED",
            OutOfBounds { .. } => "PLACEMENT_OUT_OF_BOUNDS",
            Overlap { .. } => "PLACEMENT_OVERLAP",
            NoFreeCell { .. } => "PLACEMENT_NO_FREE_CELL",
            NoRoom { .. } => "PLACEMENT_NO_ROOM",
            WouldContainItself { .. } => "PLACEMENT_WOULD_CONTAIN_ITSELF",
            NotInGrid { .. } => "PLACEMENT_NOT_IN_GRID",
            State(err) => err.error_code(),
        }
    }
}
