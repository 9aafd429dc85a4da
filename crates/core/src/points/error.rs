//! Points ledger error types.

use thiserror::Error;

/// Errors that can occur while awarding or reading points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointsError {
    /// Awards must be strictly positive.
    #[error("Point award must be positive, got {0}")]
    InvalidAward(i64),

    /// The point total would exceed the representable range.
    #[error("Point total overflow")]
    Overflow,

    /// Reading or writing the points record failed.
    #[error("Points persistence failure: {0}")]
    Persistence(String),
}

impl PointsError {
    /// Returns true if the error came from the storage backend.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}
