//! Finance entry validation errors.

use thiserror::Error;

/// Errors raised while validating incomes, expenses, goals, and fixed expenses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FinanceError {
    /// Amount must be greater than zero.
    #[error("{field} must be greater than zero")]
    NonPositiveAmount {
        /// Offending field.
        field: &'static str,
    },

    /// Amount cannot be negative.
    #[error("{field} cannot be negative")]
    NegativeAmount {
        /// Offending field.
        field: &'static str,
    },

    /// Amount exceeds what the ledger columns can store.
    #[error("{field} must not exceed 9999999999.99")]
    AmountTooLarge {
        /// Offending field.
        field: &'static str,
    },

    /// A required text field is blank.
    #[error("{field} is required")]
    MissingField {
        /// Offending field.
        field: &'static str,
    },

    /// A text field is shorter than allowed.
    #[error("{field} must be at least {min} characters")]
    TooShort {
        /// Offending field.
        field: &'static str,
        /// Minimum length.
        min: usize,
    },

    /// Unknown billing frequency.
    #[error("Invalid frequency '{0}'. Must be one of: weekly, monthly, quarterly, yearly")]
    InvalidFrequency(String),

    /// Day of month outside 1-31.
    #[error("Due day must be between 1 and 31, got {0}")]
    InvalidDueDay(i16),
}
