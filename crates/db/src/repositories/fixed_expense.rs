//! Fixed (recurring) expense repository.

use chrono::Utc;
use kapsa_core::finance::{
    CreateFixedExpenseInput, Frequency, normalize_optional, validate_fixed_expense,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::error::EntryError;
use crate::entities::fixed_expenses;

/// Repository for recurring bills.
#[derive(Debug, Clone)]
pub struct FixedExpenseRepository {
    db: DatabaseConnection,
}

impl FixedExpenseRepository {
    /// Creates a new fixed expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and stores a fixed expense.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::Validation` if the input breaks a rule, or
    /// `EntryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateFixedExpenseInput,
    ) -> Result<fixed_expenses::Model, EntryError> {
        validate_fixed_expense(&input)?;

        let now = Utc::now().into();
        let expense = fixed_expenses::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            category: Set(input.category.trim().to_string()),
            custom_category_name: Set(normalize_optional(input.custom_category_name)),
            amount: Set(input.amount),
            frequency: Set(input.frequency.as_str().to_string()),
            due_day: Set(input.due_day),
            auto_pay: Set(input.auto_pay),
            description: Set(normalize_optional(input.description)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(expense.insert(&self.db).await?)
    }

    /// Lists a user's fixed expenses, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<fixed_expenses::Model>, EntryError> {
        Ok(fixed_expenses::Entity::find()
            .filter(fixed_expenses::Column::UserId.eq(user_id))
            .order_by_desc(fixed_expenses::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}

/// Sums already loaded rows as an average monthly cost.
///
/// # Errors
///
/// Returns `EntryError::CorruptRow` if a stored frequency is unknown.
pub fn monthly_total_of(rows: &[fixed_expenses::Model]) -> Result<Decimal, EntryError> {
    rows.iter().try_fold(Decimal::ZERO, |acc, row| {
        let frequency: Frequency = row.frequency.parse().map_err(|_| EntryError::CorruptRow {
            id: row.id,
            reason: format!("unknown frequency '{}'", row.frequency),
        })?;
        Ok(acc + frequency.monthly_equivalent(row.amount))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(amount: Decimal, frequency: &str) -> fixed_expenses::Model {
        let now = Utc::now().into();
        fixed_expenses::Model {
            id: Uuid::now_v7(),
            user_id: Uuid::nil(),
            category: "housing".to_string(),
            custom_category_name: None,
            amount,
            frequency: frequency.to_string(),
            due_day: Some(1),
            auto_pay: true,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_monthly_total_mixes_frequencies() {
        let rows = vec![
            row(dec!(15000), "monthly"),
            row(dec!(1200), "yearly"),
            row(dec!(900), "quarterly"),
        ];
        assert_eq!(monthly_total_of(&rows).unwrap(), dec!(15400));
    }

    #[test]
    fn test_monthly_total_empty() {
        assert_eq!(monthly_total_of(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_monthly_total_rejects_unknown_frequency() {
        let rows = vec![row(dec!(100), "fortnightly")];
        assert!(matches!(
            monthly_total_of(&rows),
            Err(EntryError::CorruptRow { .. })
        ));
    }
}
