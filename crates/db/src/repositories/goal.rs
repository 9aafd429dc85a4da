//! Savings goal repository.

use chrono::Utc;
use kapsa_core::finance::{CreateGoalInput, normalize_optional, validate_goal};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::error::EntryError;
use crate::entities::goals;

/// Repository for savings goals.
#[derive(Debug, Clone)]
pub struct GoalRepository {
    db: DatabaseConnection,
}

impl GoalRepository {
    /// Creates a new goal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and stores a goal.
    ///
    /// A goal whose saved amount already reaches the target is stored as
    /// completed.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::Validation` if the input breaks a rule, or
    /// `EntryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateGoalInput,
    ) -> Result<goals::Model, EntryError> {
        validate_goal(&input)?;

        let now = Utc::now();
        let is_completed = input.current_amount >= input.target_amount;
        let goal = goals::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            name: Set(input.name.trim().to_string()),
            target_amount: Set(input.target_amount),
            current_amount: Set(input.current_amount),
            deadline: Set(input.deadline),
            category: Set(normalize_optional(input.category)),
            description: Set(normalize_optional(input.description)),
            priority: Set(input.priority),
            is_completed: Set(is_completed),
            completed_at: Set(is_completed.then(|| now.into())),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        Ok(goal.insert(&self.db).await?)
    }

    /// Lists a user's goals, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<goals::Model>, EntryError> {
        Ok(goals::Entity::find()
            .filter(goals::Column::UserId.eq(user_id))
            .order_by_desc(goals::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
