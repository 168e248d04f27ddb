//! Common error infrastructure for loot-core.
//!
//! Domain-specific errors (`PlacementError`, `InteractionError`, ...) live next
//! to the operations that produce them. They all implement [`StashError`] so the
//! runtime can classify and log them uniformly.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the drop or placement can be retried elsewhere
/// - **Validation**: invalid input, should not be retried unchanged
/// - **Internal**: ids or ownership links disagree with the arena
/// - **Fatal**: the arena cannot allocate or continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: grid full, cell occupied, interaction declined.
    Recoverable,

    /// Examples: category not accepted, cell out of bounds.
    Validation,

    /// Examples: unknown grid id, item not a member of the grid it claims.
    Internal,

    /// Examples: id space exhausted, missing oracle.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all loot-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait StashError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
