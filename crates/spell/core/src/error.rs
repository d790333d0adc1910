//! Common error infrastructure for spell-core.
//!
//! Domain-specific errors (`SelectionError`, `RegistrationError`, ...) live next
//! to the component that produces them. This module provides the shared
//! severity classification so hosts can pick a logging level or recovery
//! strategy without matching on every concrete type.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid request from a player; reject and carry on.
    ///
    /// Examples: selecting an index outside the known set.
    Validation,

    /// Best-effort side channel failed; the operation itself still completed.
    ///
    /// Examples: a notice could not be delivered to a disconnected player.
    Degraded,

    /// Content could not be brought up; the affected entry is skipped.
    ///
    /// Examples: a spell variant failed to instantiate at startup.
    Content,

    /// Unexpected failure inside game logic; should be investigated.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Degraded => "degraded",
            Self::Content => "content",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates a bug rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all spell-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait SpellError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
