//! Business rule validation for finance entries.

use rust_decimal::Decimal;

use super::error::FinanceError;
use super::types::{CreateExpenseInput, CreateFixedExpenseInput, CreateGoalInput, CreateIncomeInput};

/// Minimum length of a goal name.
pub const MIN_GOAL_NAME_LEN: usize = 2;

/// Largest amount a `NUMERIC(12,2)` column holds: 9,999,999,999.99.
#[must_use]
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

fn require_in_range(amount: Decimal, field: &'static str) -> Result<(), FinanceError> {
    if amount > max_amount() {
        return Err(FinanceError::AmountTooLarge { field });
    }
    Ok(())
}

fn require_positive(amount: Decimal, field: &'static str) -> Result<(), FinanceError> {
    if amount <= Decimal::ZERO {
        return Err(FinanceError::NonPositiveAmount { field });
    }
    require_in_range(amount, field)
}

fn require_text(value: &str, field: &'static str) -> Result<(), FinanceError> {
    if value.trim().is_empty() {
        return Err(FinanceError::MissingField { field });
    }
    Ok(())
}

/// Trims an optional text field, mapping blank values to `None`.
#[must_use]
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validates an income before it is stored.
///
/// # Errors
///
/// Returns an error if the amount is not positive or the source is blank.
pub fn validate_income(input: &CreateIncomeInput) -> Result<(), FinanceError> {
    require_positive(input.amount, "amount")?;
    require_text(&input.source, "source")
}

/// Validates a variable expense before it is stored.
///
/// # Errors
///
/// Returns an error if the amount is not positive or the category is blank.
pub fn validate_expense(input: &CreateExpenseInput) -> Result<(), FinanceError> {
    require_positive(input.amount, "amount")?;
    require_text(&input.category, "category")
}

/// Validates a savings goal before it is stored.
///
/// # Errors
///
/// Returns an error if the name is too short, the target is not positive, or
/// the saved amount is negative.
pub fn validate_goal(input: &CreateGoalInput) -> Result<(), FinanceError> {
    if input.name.trim().chars().count() < MIN_GOAL_NAME_LEN {
        return Err(FinanceError::TooShort {
            field: "name",
            min: MIN_GOAL_NAME_LEN,
        });
    }
    require_positive(input.target_amount, "target_amount")?;

    if input.current_amount < Decimal::ZERO {
        return Err(FinanceError::NegativeAmount {
            field: "current_amount",
        });
    }

    require_in_range(input.current_amount, "current_amount")
}

/// Validates a fixed expense before it is stored.
///
/// # Errors
///
/// Returns an error if the category is blank, the amount is not positive, or
/// the due day is outside 1-31.
pub fn validate_fixed_expense(input: &CreateFixedExpenseInput) -> Result<(), FinanceError> {
    require_text(&input.category, "category")?;
    require_positive(input.amount, "amount")?;

    if let Some(day) = input.due_day {
        if !(1..=31).contains(&day) {
            return Err(FinanceError::InvalidDueDay(day));
        }
    }

    Ok(())
}
