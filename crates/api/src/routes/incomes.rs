//! Income routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use kapsa_core::{finance::CreateIncomeInput, points::PointAction};
use kapsa_db::IncomeRepository;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ApiResult, middleware::auth::AuthUser};

/// Creates the income router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/incomes", get(list_incomes).post(create_income))
}

/// Request body for recording an income.
#[derive(Debug, Deserialize)]
pub struct CreateIncomeRequest {
    /// Amount received.
    pub amount: Decimal,
    /// Where the money came from.
    pub source: String,
    /// Optional note.
    pub description: Option<String>,
    /// When it was received; defaults to now.
    pub date: Option<DateTime<Utc>>,
}

/// POST /incomes - Record an income and award points.
async fn create_income(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateIncomeRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = IncomeRepository::new((*state.db).clone());
    let income = repo
        .create(
            user.user_id(),
            CreateIncomeInput {
                amount: payload.amount,
                source: payload.source,
                description: payload.description,
                date: payload.date,
            },
        )
        .await?;

    info!(user_id = %user.user_id(), income_id = %income.id, "Income recorded");
    state
        .awards
        .dispatch(user.points_id(), PointAction::AddTransaction);

    Ok((StatusCode::CREATED, Json(income)))
}

/// GET /incomes - List the caller's incomes, newest first.
async fn list_incomes(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = IncomeRepository::new((*state.db).clone());
    Ok(Json(repo.list_for_user(user.user_id()).await?))
}
