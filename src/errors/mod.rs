//! Error handling module for the menu backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and the
//! `{ success: false, ... }` response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Generic message used when internal details must not leak.
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

/// Application error type.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Authentication required or rejected
    Unauthorized(String),
    /// Resource not found
    NotFound(String),
    /// One or more field constraints were violated
    Validation(Vec<String>),
    /// Malformed or out-of-range request parameter
    BadRequest(String),
    /// Database error
    Database(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Shorthand for a validation failure with a single message.
    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(errors) if errors.len() == 1 => errors[0].clone(),
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Database(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
        }
    }

    fn is_internal(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::Internal(_))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // CHECK constraint failures are schema violations, not outages.
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.message().contains("CHECK constraint failed") {
                tracing::warn!("Schema violation: {}", db_err.message());
                return AppError::invalid(format!("Invalid menu item: {}", db_err.message()));
            }
        }
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Internal(format!("JSON error: {}", err))
    }
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Debug form and backtrace of a 5xx error, outside production only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorResponse {
    /// Build the envelope, hiding internal details when `expose_internal` is false.
    pub fn new(error: &AppError, expose_internal: bool) -> Self {
        let message = if error.is_internal() && !expose_internal {
            GENERIC_INTERNAL_MESSAGE.to_string()
        } else {
            error.message()
        };

        let errors = match error {
            AppError::Validation(errors) => Some(errors.clone()),
            _ => None,
        };

        let stack = (error.is_internal() && expose_internal)
            .then(|| format!("{:?}\n{}", error, Backtrace::force_capture()));

        Self {
            success: false,
            code: error.error_code().to_string(),
            message,
            errors,
            stack,
        }
    }
}

/// Wrapper type for errors that know whether internal details may be shown.
pub struct ApiError {
    pub error: AppError,
    pub expose_internal: bool,
}

impl ApiError {
    pub fn new(error: AppError, expose_internal: bool) -> Self {
        Self {
            error,
            expose_internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.error);
        }
        let body = ErrorResponse::new(&self.error, self.expose_internal);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_envelope_lists_every_error() {
        let err = AppError::Validation(vec!["a".to_string(), "b".to_string()]);
        let body = ErrorResponse::new(&err, false);

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(body.code, codes::VALIDATION_ERROR);
        assert_eq!(body.message, "Validation failed");
        assert_eq!(body.errors, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_internal_message_hidden_in_production() {
        let err = AppError::Database("disk I/O error".to_string());

        let hidden = ErrorResponse::new(&err, false);
        assert_eq!(hidden.message, GENERIC_INTERNAL_MESSAGE);
        assert!(hidden.stack.is_none());

        let shown = ErrorResponse::new(&err, true);
        assert_eq!(shown.message, "disk I/O error");
    }

    #[test]
    fn test_stack_attached_only_when_exposed() {
        let err = AppError::Internal("boom".to_string());

        let shown = serde_json::to_value(ErrorResponse::new(&err, true)).unwrap();
        let stack = shown["stack"].as_str().unwrap();
        assert!(stack.starts_with("Internal(\"boom\")"));

        let hidden = serde_json::to_value(ErrorResponse::new(&err, false)).unwrap();
        assert!(hidden.get("stack").is_none());
        assert_eq!(hidden["message"], GENERIC_INTERNAL_MESSAGE);
    }

    #[test]
    fn test_client_errors_carry_no_stack() {
        let err = AppError::BadRequest("bad".to_string());
        assert!(ErrorResponse::new(&err, true).stack.is_none());
    }

    #[test]
    fn test_not_found_is_never_hidden() {
        let err = AppError::NotFound("Menu item x not found".to_string());
        let body = ErrorResponse::new(&err, false);

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Menu item x not found");
        assert!(body.errors.is_none());
    }
}
