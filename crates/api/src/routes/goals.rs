//! Savings goal routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use kapsa_core::{finance::CreateGoalInput, points::PointAction};
use kapsa_db::GoalRepository;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ApiResult, middleware::auth::AuthUser};

/// Creates the goal router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/goals", get(list_goals).post(create_goal))
}

/// Request body for creating a goal.
#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    /// Goal name.
    pub name: String,
    /// Amount to save.
    pub target_amount: Decimal,
    /// Amount already saved.
    #[serde(default)]
    pub current_amount: Decimal,
    /// Target date.
    pub deadline: Option<NaiveDate>,
    /// Category.
    pub category: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Ordering hint.
    #[serde(default)]
    pub priority: i32,
}

/// POST /goals - Create a goal and award points.
async fn create_goal(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateGoalRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = GoalRepository::new((*state.db).clone());
    let goal = repo
        .create(
            user.user_id(),
            CreateGoalInput {
                name: payload.name,
                target_amount: payload.target_amount,
                current_amount: payload.current_amount,
                deadline: payload.deadline,
                category: payload.category,
                description: payload.description,
                priority: payload.priority,
            },
        )
        .await?;

    info!(user_id = %user.user_id(), goal_id = %goal.id, "Goal created");
    state
        .awards
        .dispatch(user.points_id(), PointAction::GoalCreated);

    Ok((StatusCode::CREATED, Json(goal)))
}

/// GET /goals - List the caller's goals.
async fn list_goals(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = GoalRepository::new((*state.db).clone());
    Ok(Json(repo.list_for_user(user.user_id()).await?))
}
