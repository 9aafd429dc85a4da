//! Error type shared by the finance entry repositories.

use kapsa_core::finance::FinanceError;
use sea_orm::DbErr;

/// Errors returned when writing or reading finance entries.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// Input failed a business rule.
    #[error(transparent)]
    Validation(#[from] FinanceError),

    /// A stored row holds a value the domain cannot represent.
    #[error("Corrupt row {id}: {reason}")]
    CorruptRow {
        /// Row identifier.
        id: uuid::Uuid,
        /// What was wrong with it.
        reason: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}
