//! Dashboard repository: balance totals, recent activity, and spending by category.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::Expr,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{incomes, variable_expenses};

/// Number of entries in the recent activity feed.
pub const RECENT_ENTRIES: u64 = 5;

/// Kind of a recent entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

/// One line of the recent activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentEntry {
    /// Income or expense.
    pub kind: EntryKind,
    /// Row id.
    pub id: Uuid,
    /// Amount, always positive.
    pub amount: Decimal,
    /// Income source or expense category.
    pub label: String,
    /// When the money moved.
    pub date: DateTime<Utc>,
}

impl From<incomes::Model> for RecentEntry {
    fn from(m: incomes::Model) -> Self {
        Self {
            kind: EntryKind::Income,
            id: m.id,
            amount: m.amount,
            label: m.source,
            date: m.date.with_timezone(&Utc),
        }
    }
}

impl From<variable_expenses::Model> for RecentEntry {
    fn from(m: variable_expenses::Model) -> Self {
        Self {
            kind: EntryKind::Expense,
            id: m.id,
            amount: m.amount,
            label: m.category,
            date: m.date.with_timezone(&Utc),
        }
    }
}

/// Balance overview for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Sum of all incomes.
    pub total_income: Decimal,
    /// Sum of all variable expenses.
    pub total_expenses: Decimal,
    /// Income minus expenses.
    pub balance: Decimal,
    /// Newest incomes and expenses, newest first.
    pub recent: Vec<RecentEntry>,
}

/// Spending total for one expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// Expense category.
    pub category: String,
    /// Sum of expenses in the category.
    pub total: Decimal,
}

/// Merges two newest-first feeds and keeps the `limit` newest entries.
#[must_use]
pub fn merge_recent(
    incomes: Vec<incomes::Model>,
    expenses: Vec<variable_expenses::Model>,
    limit: usize,
) -> Vec<RecentEntry> {
    let mut entries: Vec<RecentEntry> = incomes
        .into_iter()
        .map(RecentEntry::from)
        .chain(expenses.into_iter().map(RecentEntry::from))
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    entries.truncate(limit);
    entries
}

/// Read-only queries behind the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Totals, balance, and the recent activity feed for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn summary(&self, user_id: Uuid) -> Result<DashboardSummary, DbErr> {
        let total_income: Option<Decimal> = incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(user_id))
            .select_only()
            .column_as(Expr::col(incomes::Column::Amount).sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await?
            .flatten();

        let total_expenses: Option<Decimal> = variable_expenses::Entity::find()
            .filter(variable_expenses::Column::UserId.eq(user_id))
            .select_only()
            .column_as(Expr::col(variable_expenses::Column::Amount).sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await?
            .flatten();

        let recent_incomes = incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(user_id))
            .order_by_desc(incomes::Column::Date)
            .limit(RECENT_ENTRIES)
            .all(&self.db)
            .await?;

        let recent_expenses = variable_expenses::Entity::find()
            .filter(variable_expenses::Column::UserId.eq(user_id))
            .order_by_desc(variable_expenses::Column::Date)
            .limit(RECENT_ENTRIES)
            .all(&self.db)
            .await?;

        let total_income = total_income.unwrap_or(Decimal::ZERO);
        let total_expenses = total_expenses.unwrap_or(Decimal::ZERO);

        Ok(DashboardSummary {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            recent: merge_recent(
                recent_incomes,
                recent_expenses,
                usize::try_from(RECENT_ENTRIES).unwrap_or(usize::MAX),
            ),
        })
    }

    /// Expense totals per category, largest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn expenses_by_category(&self, user_id: Uuid) -> Result<Vec<CategoryTotal>, DbErr> {
        let rows: Vec<(String, Option<Decimal>)> = variable_expenses::Entity::find()
            .filter(variable_expenses::Column::UserId.eq(user_id))
            .select_only()
            .column(variable_expenses::Column::Category)
            .column_as(Expr::col(variable_expenses::Column::Amount).sum(), "total")
            .group_by(variable_expenses::Column::Category)
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut totals: Vec<CategoryTotal> = rows
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category,
                total: total.unwrap_or(Decimal::ZERO),
            })
            .collect();
        totals.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.cmp(&b.category))
        });
        Ok(totals)
    }
}
