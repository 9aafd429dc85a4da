//! Conversion of domain errors into JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kapsa_core::points::PointsError;
use kapsa_db::EntryError;
use kapsa_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Handler error rendered as `{"error": <code>, "message": <text>}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Builds a 400 validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.public_message(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<DbErr> for ApiError {
    fn from(e: DbErr) -> Self {
        Self(AppError::Database(e.to_string()))
    }
}

impl From<EntryError> for ApiError {
    fn from(e: EntryError) -> Self {
        match e {
            EntryError::Validation(v) => Self::validation(v.to_string()),
            EntryError::CorruptRow { .. } => Self(AppError::Internal(e.to_string())),
            EntryError::Database(db) => db.into(),
        }
    }
}

impl From<PointsError> for ApiError {
    fn from(e: PointsError) -> Self {
        match e {
            PointsError::InvalidAward(_) => Self::validation(e.to_string()),
            PointsError::Overflow | PointsError::Persistence(_) => {
                Self(AppError::Internal(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kapsa_core::finance::FinanceError;

    #[test]
    fn test_validation_maps_to_400() {
        let err: ApiError = EntryError::Validation(FinanceError::MissingField { field: "source" }).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let err: ApiError = DbErr::Custom("connection reset".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_points_errors() {
        let invalid: ApiError = PointsError::InvalidAward(0).into();
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let persistence: ApiError = PointsError::Persistence("down".to_string()).into();
        assert_eq!(
            persistence.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
