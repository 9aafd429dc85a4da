//! Variable expense routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use kapsa_core::{finance::CreateExpenseInput, points::PointAction};
use kapsa_db::ExpenseRepository;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ApiResult, middleware::auth::AuthUser};

/// Creates the expense router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/expenses", get(list_expenses).post(create_expense))
}

/// Request body for recording a variable expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Amount spent.
    pub amount: Decimal,
    /// Spending category.
    pub category: String,
    /// Optional note.
    pub description: Option<String>,
    /// Optional merchant.
    pub merchant: Option<String>,
    /// Impulse purchase flag.
    #[serde(default)]
    pub is_impulse: bool,
    /// When it was spent; defaults to now.
    pub date: Option<DateTime<Utc>>,
}

/// POST /expenses - Record an expense and award points.
async fn create_expense(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateExpenseRequest>,
) -> ApiResult<impl IntoResponse> {
    let repo = ExpenseRepository::new((*state.db).clone());
    let expense = repo
        .create(
            user.user_id(),
            CreateExpenseInput {
                amount: payload.amount,
                category: payload.category,
                description: payload.description,
                merchant: payload.merchant,
                is_impulse: payload.is_impulse,
                date: payload.date,
            },
        )
        .await?;

    info!(user_id = %user.user_id(), expense_id = %expense.id, "Expense recorded");
    state
        .awards
        .dispatch(user.points_id(), PointAction::AddTransaction);

    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /expenses - List the caller's expenses, newest first.
async fn list_expenses(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let repo = ExpenseRepository::new((*state.db).clone());
    Ok(Json(repo.list_for_user(user.user_id()).await?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use kapsa_core::points::MemoryPointsStore;
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::create_router;
    use crate::test_support::{bearer, post_json, state_with_store};

    #[tokio::test]
    async fn test_expense_without_category_awards_nothing() {
        let store = Arc::new(MemoryPointsStore::new());
        let (state, worker) = state_with_store(Arc::clone(&store));
        let auth = bearer(&state, Uuid::new_v4());
        let app = create_router(state);

        let response = app
            .oneshot(post_json(
                "/api/v1/expenses",
                auth,
                &json!({ "amount": "12.90", "category": "  " }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(worker.run().await.applied, 0);
        assert!(store.is_empty());
    }
}

/// Tests against a migrated Postgres database.
/// Set DATABASE_URL and run: cargo test -p kapsa-api expenses::integration_tests
#[cfg(test)]
mod integration_tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use kapsa_core::points::{MemoryPointsStore, PointsStore};
    use kapsa_db::UserRepository;
    use kapsa_shared::types::UserId;
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::create_router;
    use crate::test_support::{bearer, connect, json_body, post_json, state_with};

    #[tokio::test]
    async fn test_recorded_expense_awards_transaction_points() {
        let db = connect().await;
        let user = UserRepository::new(db.clone())
            .create(
                &format!("expenses-{}@example.com", Uuid::new_v4()),
                "hash",
                "Route Tester",
            )
            .await
            .expect("Failed to create user");
        let store = Arc::new(MemoryPointsStore::new());
        let (state, worker) = state_with(db, Arc::clone(&store));
        let auth = bearer(&state, user.id);
        let app = create_router(state);

        let response = app
            .oneshot(post_json(
                "/api/v1/expenses",
                auth,
                &json!({ "amount": "12.90", "category": "groceries", "merchant": "Albert" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["category"], "groceries");

        assert_eq!(worker.run().await.applied, 1);
        let record = store.get(UserId::from_uuid(user.id)).await.unwrap();
        assert_eq!(record.map(|r| r.total_points), Some(10));
    }
}
