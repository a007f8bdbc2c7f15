use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
///
/// The confirmation pipeline stages each map to their own variant so a
/// failure can always be traced to the stage that produced it.
#[derive(Debug)]
pub enum AppError {
    /// Database-related errors.
    DatabaseError(sqlx::Error),
    /// Invalid submission input (blocks the pipeline before any stage runs).
    Validation(String),
    /// Text Generation Service failure (non-fatal inside the pipeline).
    GenerationFailure(String),
    /// Record Store insert failure (reported, does not block delivery).
    PersistenceFailure(String),
    /// Email Delivery Service failure (fatal to the invocation).
    DeliveryFailure(String),
    /// Internal server error.
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(e) => write!(f, "Database error: {}", e),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::GenerationFailure(msg) => write!(f, "Generation failure: {}", msg),
            AppError::PersistenceFailure(msg) => write!(f, "Persistence failure: {}", msg),
            AppError::DeliveryFailure(msg) => write!(f, "Delivery failure: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each error variant to an appropriate HTTP status code and JSON body.
    /// Logs errors with the stage that produced them.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::DatabaseError(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::GenerationFailure(msg) => {
                tracing::error!("Generation stage failed: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Text generation service error".to_string(),
                )
            }
            AppError::PersistenceFailure(msg) => {
                tracing::error!("Persistence stage failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to store lead".to_string(),
                )
            }
            AppError::DeliveryFailure(msg) => {
                tracing::error!("Delivery stage failed: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Email delivery service error".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}
