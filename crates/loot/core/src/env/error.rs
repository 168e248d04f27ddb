use crate::error::{ErrorSeverity, StashError};
use crate::state::InfoId;

/// Errors raised when an oracle is missing or cannot answer a lookup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("item oracle not available")]
    ItemsNotAvailable,

    #[error("bounds oracle not available")]
    BoundsNotAvailable,

    #[error("engine config not available")]
    ConfigNotAvailable,

    #[error("no item descriptor with id {0}")]
    UnknownInfo(InfoId),

    #[error("no item descriptor named '{0}'")]
    UnknownName(String),
}

impl StashError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ItemsNotAvailable | Self::BoundsNotAvailable | Self::ConfigNotAvailable => {
                ErrorSeverity::Fatal
            }
            Self::UnknownInfo(_) | Self::UnknownName(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            Self::BoundsNotAvailable => "ORACLE_BOUNDS_NOT_AVAILABLE",
            Self::ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            Self::UnknownInfo(_) => "ORACLE_UNKNOWN_INFO",
            Self::UnknownName(_) => "ORACLE_UNKNOWN_NAME",
        }
    }
}
