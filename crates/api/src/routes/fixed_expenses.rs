//! Fixed expense routes. Recurring bills do not earn points.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use kapsa_core::finance::{CreateFixedExpenseInput, Frequency};
use kapsa_db::{FixedExpenseRepository, entities::fixed_expenses, repositories::monthly_total_of};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::auth::AuthUser,
};

/// Creates the fixed expense router.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/fixed-expenses",
        get(list_fixed_expenses).post(create_fixed_expense),
    )
}

/// Request body for creating a fixed expense.
#[derive(Debug, Deserialize)]
pub struct CreateFixedExpenseRequest {
    /// Expense category.
    pub category: String,
    /// Label for a custom category.
    pub custom_category_name: Option<String>,
    /// Amount per period.
    pub amount: Decimal,
    /// `weekly`, `monthly`, `quarterly` or `yearly`; defaults to monthly.
    pub frequency: Option<String>,
    /// Day of month the bill is due.
    pub due_day: Option<i16>,
    /// Automatic payment flag.
    #[serde(default)]
    pub auto_pay: bool,
    /// Description.
    pub description: Option<String>,
}

/// Fixed expenses with their combined monthly cost.
#[derive(Debug, Serialize)]
pub struct FixedExpenseList {
    /// Stored rows, newest first.
    pub items: Vec<fixed_expenses::Model>,
    /// Sum of all rows as an average monthly amount.
    pub monthly_total: Decimal,
}

/// POST /fixed-expenses - Create a fixed expense.
async fn create_fixed_expense(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateFixedExpenseRequest>,
) -> ApiResult<impl IntoResponse> {
    let frequency = match payload.frequency.as_deref() {
        None => Frequency::Monthly,
        Some(raw) => raw
            .parse::<Frequency>()
            .map_err(|e| ApiError::validation(e.to_string()))?,
    };

    let repo = FixedExpenseRepository::new((*state.db).clone());
    let expense = repo
        .create(
            user.user_id(),
            CreateFixedExpenseInput {
                category: payload.category,
                custom_category_name: payload.custom_category_name,
                amount: payload.amount,
                frequency,
                due_day: payload.due_day,
                auto_pay: payload.auto_pay,
                description: payload.description,
            },
        )
        .await?;

    info!(user_id = %user.user_id(), fixed_expense_id = %expense.id, "Fixed expense created");

    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /fixed-expenses - List the caller's fixed expenses and their monthly total.
async fn list_fixed_expenses(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = FixedExpenseRepository::new((*state.db).clone());
    let items = repo.list_for_user(user.user_id()).await?;
    let monthly_total = monthly_total_of(&items)?;

    Ok(Json(FixedExpenseList {
        items,
        monthly_total,
    }))
}
