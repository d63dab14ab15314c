use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use page_builder_core::{MutationError, SaveError, ValidationError};
use serde_json::json;

/// Handler errors, rendered as `{ "error": { type, message, statusCode } }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("save failed: {0}")]
    SaveFailed(#[from] SaveError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<MutationError> for ApiError {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::BlockNotFound(_) => ApiError::NotFound(err.to_string()),
            MutationError::InvalidContent(_)
            | MutationError::InvalidSlug(_)
            | MutationError::IndexOutOfRange { .. } => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "badRequest", msg.clone()),
            ApiError::SaveFailed(err @ SaveError::Rejected(_)) => {
                (StatusCode::CONFLICT, "conflict", err.to_string())
            }
            ApiError::SaveFailed(err) => (StatusCode::BAD_GATEWAY, "saveFailed", err.to_string()),
            ApiError::Internal(_) | ApiError::Database(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": {
                "type": error_type,
                "message": message,
                "statusCode": status.as_u16(),
            }
        });
        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
