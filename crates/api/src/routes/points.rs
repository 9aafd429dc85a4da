//! Points progress and leaderboard routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use kapsa_core::points::DEFAULT_LEADERBOARD_LIMIT;
use kapsa_db::UserRepository;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiResult, middleware::auth::AuthUser};

/// Creates the points router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/points/me", get(my_progress))
        .route("/points/leaderboard", get(leaderboard))
}

/// Query parameters for the leaderboard.
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// Number of entries; clamped to 1-100.
    pub limit: Option<u64>,
}

/// Leaderboard row with the user's display name.
#[derive(Debug, Serialize)]
pub struct LeaderboardRow {
    /// 1-based position.
    pub rank: u32,
    /// User ID.
    pub user_id: Uuid,
    /// Display name, if the user still exists.
    pub name: Option<String>,
    /// Current level.
    pub level: i32,
    /// Cumulative points.
    pub total_points: i64,
}

/// GET /points/me - The caller's level and progress.
async fn my_progress(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let progress = state.ledger.progress(user.points_id()).await?;
    Ok(Json(progress))
}

/// GET /points/leaderboard - Top users by total points.
async fn leaderboard(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<LeaderboardQuery>,
) -> ApiResult<impl IntoResponse> {
    let entries = state
        .ledger
        .leaderboard(query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT))
        .await?;

    let ids: Vec<Uuid> = entries.iter().map(|e| e.user_id.into_inner()).collect();
    let mut names = UserRepository::new((*state.db).clone())
        .names_by_ids(&ids)
        .await?;

    let rows: Vec<LeaderboardRow> = entries
        .into_iter()
        .map(|e| LeaderboardRow {
            rank: e.rank,
            user_id: e.user_id.into_inner(),
            name: names.remove(&e.user_id.into_inner()),
            level: e.level,
            total_points: e.total_points,
        })
        .collect();

    Ok(Json(rows))
}
