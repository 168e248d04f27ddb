use crate::engine::PlacementError;
use crate::error::{ErrorSeverity, StashError};
use crate::state::{ItemId, StateError};

use super::InteractionKind;

/// Errors raised while applying an interaction.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InteractionError {
    /// The stationary item does not react to the dragged one.
    #[error("{target} does not accept {dragged}")]
    Declined { dragged: ItemId, target: ItemId },

    #[error("{0} has no magazine")]
    NotAGun(ItemId),

    /// Planned effect no longer matches the state it is applied to.
    #[error("{kind} interaction between {dragged} and {target} is stale")]
    Stale {
        kind: InteractionKind,
        dragged: ItemId,
        target: ItemId,
    },

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl StashError for InteractionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Declined { .. } => ErrorSeverity::Recoverable,
            Self::NotAGun(_) => ErrorSeverity::Validation,
            Self::Stale { .. } => ErrorSeverity::Internal,
            Self::Placement(err) => err.severity(),
            Self::State(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Declined { .. } => "INTERACTION_DECLINED",
            Self::NotAGun(_) => "INTERACTION_NOT_A_GUN",
            Self::Stale { .. } => "INTERACTION_STALE",
            Self::Placement(err) => err.error_code(),
            Self::State(err) => err.error_code(),
        }
    }
}
