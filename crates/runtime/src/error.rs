//! Unified error type surfaced by the runtime.
//!
//! Wraps core and content failures so session callers can bubble them up
//! with one type and still classify them through [`StashError`].
use loot_content::PresetError;
use loot_core::{
    ErrorSeverity, InteractionError, ItemId, OracleError, PlacementError, StashError, StateError,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{item} is still hidden and cannot be moved")]
    Hidden { item: ItemId },

    #[error("{item} is not placed in any region")]
    Unplaced { item: ItemId },

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Interaction(#[from] InteractionError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error(transparent)]
    Content(#[from] anyhow::Error),
}

impl RuntimeError {
    /// Severity of the underlying failure; runtime-only variants are
    /// recoverable because the session state is untouched.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Hidden { .. } | Self::Unplaced { .. } => ErrorSeverity::Recoverable,
            Self::Placement(err) => err.severity(),
            Self::Interaction(err) => err.severity(),
            Self::State(err) => err.severity(),
            Self::Oracle(err) => err.severity(),
            Self::Preset(_) => ErrorSeverity::Validation,
            Self::Content(_) => ErrorSeverity::Fatal,
        }
    }
}
