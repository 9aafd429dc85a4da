//! Income repository.

use chrono::Utc;
use kapsa_core::finance::{CreateIncomeInput, normalize_optional, validate_income};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::error::EntryError;
use crate::entities::incomes;

/// Repository for a user's incomes.
#[derive(Debug, Clone)]
pub struct IncomeRepository {
    db: DatabaseConnection,
}

impl IncomeRepository {
    /// Creates a new income repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and stores an income.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::Validation` if the input breaks a rule, or
    /// `EntryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateIncomeInput,
    ) -> Result<incomes::Model, EntryError> {
        validate_income(&input)?;

        let now = Utc::now();
        let income = incomes::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            amount: Set(input.amount),
            source: Set(input.source.trim().to_string()),
            description: Set(normalize_optional(input.description)),
            date: Set(input.date.unwrap_or(now).into()),
            created_at: Set(now.into()),
        };

        Ok(income.insert(&self.db).await?)
    }

    /// Lists a user's incomes, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<incomes::Model>, EntryError> {
        Ok(incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(user_id))
            .order_by_desc(incomes::Column::Date)
            .all(&self.db)
            .await?)
    }
}
