//! Incomes, expenses, savings goals, and fixed expenses.

pub mod error;
pub mod types;
pub mod validation;

pub use error::FinanceError;
pub use types::{
    CreateExpenseInput, CreateFixedExpenseInput, CreateGoalInput, CreateIncomeInput, Frequency,
};
pub use validation::{
    max_amount, normalize_optional, validate_expense, validate_fixed_expense, validate_goal, validate_income,
};
