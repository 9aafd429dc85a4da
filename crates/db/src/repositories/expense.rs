//! Variable expense repository.

use chrono::Utc;
use kapsa_core::finance::{CreateExpenseInput, normalize_optional, validate_expense};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::error::EntryError;
use crate::entities::variable_expenses;

/// Repository for a user's day-to-day spending.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and stores a variable expense.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::Validation` if the input breaks a rule, or
    /// `EntryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateExpenseInput,
    ) -> Result<variable_expenses::Model, EntryError> {
        validate_expense(&input)?;

        let now = Utc::now();
        let expense = variable_expenses::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            amount: Set(input.amount),
            category: Set(input.category.trim().to_string()),
            description: Set(normalize_optional(input.description)),
            merchant: Set(normalize_optional(input.merchant)),
            is_impulse: Set(input.is_impulse),
            date: Set(input.date.unwrap_or(now).into()),
            created_at: Set(now.into()),
        };

        Ok(expense.insert(&self.db).await?)
    }

    /// Lists a user's expenses, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<variable_expenses::Model>, EntryError> {
        Ok(variable_expenses::Entity::find()
            .filter(variable_expenses::Column::UserId.eq(user_id))
            .order_by_desc(variable_expenses::Column::Date)
            .all(&self.db)
            .await?)
    }
}
