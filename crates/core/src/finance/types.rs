//! Finance entry data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::FinanceError;

/// How often a fixed expense is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Every week.
    Weekly,
    /// Every month.
    Monthly,
    /// Every three months.
    Quarterly,
    /// Every year.
    Yearly,
}

impl Frequency {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    /// Converts a per-period amount to its average monthly cost.
    ///
    /// Weekly amounts use 52 weeks per year.
    #[must_use]
    pub fn monthly_equivalent(self, amount: Decimal) -> Decimal {
        let monthly = match self {
            Self::Weekly => amount * Decimal::from(52) / Decimal::from(12),
            Self::Monthly => amount,
            Self::Quarterly => amount / Decimal::from(3),
            Self::Yearly => amount / Decimal::from(12),
        };
        monthly.round_dp(2)
    }
}

impl std::str::FromStr for Frequency {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(FinanceError::InvalidFrequency(s.to_string())),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for recording an income.
#[derive(Debug, Clone)]
pub struct CreateIncomeInput {
    /// Amount received.
    pub amount: Decimal,
    /// Where the money came from (salary, freelance, ...).
    pub source: String,
    /// Optional note.
    pub description: Option<String>,
    /// When it was received; defaults to now.
    pub date: Option<DateTime<Utc>>,
}

/// Input for recording a variable expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Amount spent.
    pub amount: Decimal,
    /// Spending category.
    pub category: String,
    /// Optional note.
    pub description: Option<String>,
    /// Optional merchant name.
    pub merchant: Option<String>,
    /// Whether this was an impulse purchase.
    pub is_impulse: bool,
    /// When it was spent; defaults to now.
    pub date: Option<DateTime<Utc>>,
}

/// Input for creating a savings goal.
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    /// Goal name.
    pub name: String,
    /// Amount to save.
    pub target_amount: Decimal,
    /// Amount already saved.
    pub current_amount: Decimal,
    /// Optional target date.
    pub deadline: Option<NaiveDate>,
    /// Optional category.
    pub category: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Ordering hint; higher is more important.
    pub priority: i32,
}

/// Input for creating a fixed (recurring) expense.
#[derive(Debug, Clone)]
pub struct CreateFixedExpenseInput {
    /// Expense category.
    pub category: String,
    /// Label used when `category` is a custom one.
    pub custom_category_name: Option<String>,
    /// Amount per billing period.
    pub amount: Decimal,
    /// Billing frequency.
    pub frequency: Frequency,
    /// Day of month the payment is due.
    pub due_day: Option<i16>,
    /// Whether the payment is automatic.
    pub auto_pay: bool,
    /// Optional description.
    pub description: Option<String>,
}
