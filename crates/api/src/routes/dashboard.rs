//! Dashboard routes.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use kapsa_db::DashboardRepository;

use crate::{AppState, error::ApiResult, middleware::auth::AuthUser};

/// Creates the dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/summary", get(get_summary))
        .route(
            "/dashboard/expenses-by-category",
            get(get_expenses_by_category),
        )
}

/// GET /dashboard/summary - Totals, balance, and the five newest entries.
async fn get_summary(State(state): State<AppState>, user: AuthUser) -> ApiResult<impl IntoResponse> {
    let repo = DashboardRepository::new((*state.db).clone());
    Ok(Json(repo.summary(user.user_id()).await?))
}

/// GET /dashboard/expenses-by-category - Spending per category, largest first.
async fn get_expenses_by_category(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = DashboardRepository::new((*state.db).clone());
    Ok(Json(repo.expenses_by_category(user.user_id()).await?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use kapsa_core::points::MemoryPointsStore;
    use tower::ServiceExt;

    use crate::create_router;
    use crate::test_support::{json_body, state_with_store};

    #[tokio::test]
    async fn test_dashboard_requires_auth() {
        let (state, _worker) = state_with_store(Arc::new(MemoryPointsStore::new()));
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/dashboard/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"], "missing_token");
    }
}
