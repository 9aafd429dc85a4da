//! Registration and login routes.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use kapsa_core::auth::{check_password_policy, hash_password, normalize_email, verify_password};
use kapsa_db::UserRepository;
use kapsa_shared::{
    AppError,
    auth::{LoginRequest, LoginResponse, RegisterRequest, UserInfo},
};
use sea_orm::SqlErr;
use tracing::info;

use crate::{AppState, error::ApiError, error::ApiResult};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}

fn invalid_credentials() -> ApiError {
    ApiError(AppError::Unauthorized("Invalid email or password".to_string()))
}

/// POST /auth/login - Authenticate user and return an access token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = normalize_email(&payload.email).ok_or_else(invalid_credentials)?;
    let user_repo = UserRepository::new((*state.db).clone());

    let Some(user) = user_repo.find_by_email(&email).await? else {
        info!(email = %email, "Login attempt for non-existent user");
        return Err(invalid_credentials());
    };

    let valid = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;
    if !valid {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(invalid_credentials());
    }

    let access_token = state
        .jwt_service
        .generate_access_token(user.id)
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;

    info!(user_id = %user.id, "User logged in successfully");

    Ok(Json(LoginResponse {
        user: UserInfo {
            id: user.id,
            email: user.email,
            name: user.name,
        },
        access_token,
        token_type: "Bearer",
        expires_in: state.jwt_service.access_token_expires_in(),
    }))
}

/// POST /auth/register - Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = normalize_email(&payload.email)
        .ok_or_else(|| ApiError::validation("Invalid email address"))?;
    check_password_policy(&payload.password).map_err(|e| ApiError::validation(e.to_string()))?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("name is required"));
    }

    let user_repo = UserRepository::new((*state.db).clone());
    if user_repo.email_exists(&email).await? {
        return Err(ApiError(AppError::Conflict(
            "Email is already registered".to_string(),
        )));
    }

    let password_hash = hash_password(&payload.password)
        .map_err(|e| ApiError(AppError::Internal(e.to_string())))?;

    let user = user_repo
        .create(&email, &password_hash, name)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ApiError(AppError::Conflict("Email is already registered".to_string()))
            }
            _ => e.into(),
        })?;

    info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(UserInfo {
            id: user.id,
            email: user.email,
            name: user.name,
        }),
    ))
}
