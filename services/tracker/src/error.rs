//! Custom error types for the tracker service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the tracker service
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Invalid or inactive session token
    #[error("Unauthorized")]
    Unauthorized,

    /// Referenced item does not exist (or belongs to another token)
    #[error("Item not found")]
    NotFound,

    /// Username is already taken
    #[error("Username is already taken")]
    Conflict,

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            TrackerError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            TrackerError::NotFound => (StatusCode::NOT_FOUND, "Item not found".to_string()),
            TrackerError::Conflict => (
                StatusCode::CONFLICT,
                "Username is already taken".to_string(),
            ),
            TrackerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            TrackerError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            TrackerError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for tracker results
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Whether an error from a repository is a unique-constraint violation
///
/// Used by registration to turn a duplicate username into a typed
/// Conflict instead of a generic store failure.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db| db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_the_taxonomy() {
        assert_eq!(
            TrackerError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            TrackerError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            TrackerError::Conflict.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            TrackerError::BadRequest("bad".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TrackerError::InternalServerError.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unique_violation_probe_ignores_other_errors() {
        let err = anyhow::anyhow!("plain failure");
        assert!(!is_unique_violation(&err));

        let err = anyhow::Error::from(sqlx::Error::RowNotFound);
        assert!(!is_unique_violation(&err));
    }
}
