//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for finance entries and points
//! - Authentication middleware
//! - Error to response mapping

pub mod error;
pub mod middleware;
pub mod routes;

pub use error::{ApiError, ApiResult};

use axum::Router;
use kapsa_core::points::{AwardDispatcher, PointsLedger};
use kapsa_shared::JwtService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Points ledger for reads (progress, leaderboard).
    pub ledger: Arc<PointsLedger>,
    /// Queue for awards triggered by financial writes.
    pub awards: AwardDispatcher,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod test_support;
