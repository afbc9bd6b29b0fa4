//! Request-path error type. Database modules return `sqlx::Error` and the
//! handlers bubble everything up as an `ApiError`, which renders the JSON
//! `{ "message": ... }` body the frontend expects.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed request field.
    #[error("{0}")]
    Validation(String),

    /// No record for the requested id.
    #[error("{0}")]
    NotFound(&'static str),

    /// Uniqueness conflict, e.g. duplicate email.
    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to render report: {0}")]
    Report(String),

    #[error("{0}")]
    Internal(String),
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, (*msg).to_string()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::Database(err) if is_unique_violation(err) => {
                (StatusCode::CONFLICT, "Record already exists".to_string())
            }
            _ => {
                tracing::error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
