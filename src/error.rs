//! Application error type shared by every layer.
//!
//! Each variant maps to one error kind of the public API and to an HTTP status
//! code. API responses carry a structured `{kind, message, details}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Structured error payload returned by API endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

/// Errors produced by services, repositories and handlers.
///
/// `Storage` and `Timeout` are transient: no operation leaves a partial write
/// behind, so callers may retry the whole request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Blocked { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    RateLimited { message: String, details: Value },

    #[error("{message}")]
    Storage { message: String, details: Value },

    #[error("{message}")]
    Timeout { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn blocked(message: impl Into<String>, details: Value) -> Self {
        Self::Blocked {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn rate_limited(message: impl Into<String>, details: Value) -> Self {
        Self::RateLimited {
            message: message.into(),
            details,
        }
    }

    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }

    pub fn timeout(message: impl Into<String>, details: Value) -> Self {
        Self::Timeout {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable kind reported to API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput { .. } => "invalid_input",
            AppError::NotFound { .. } => "not_found",
            AppError::Blocked { .. } => "blocked",
            AppError::Conflict { .. } => "conflict",
            AppError::RateLimited { .. } => "rate_limited",
            AppError::Storage { .. } => "storage_error",
            AppError::Timeout { .. } => "timeout",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Blocked { .. } => StatusCode::FORBIDDEN,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Storage { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether retrying the whole operation may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Storage { .. } | AppError::Timeout { .. })
    }

    /// Returns true for a unique-constraint conflict on `constraint`.
    pub fn is_conflict_on(&self, constraint: &str) -> bool {
        match self {
            AppError::Conflict { details, .. } => {
                details.get("constraint").and_then(Value::as_str) == Some(constraint)
            }
            _ => false,
        }
    }

    fn details(&self) -> &Value {
        match self {
            AppError::InvalidInput { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Blocked { details, .. }
            | AppError::Conflict { details, .. }
            | AppError::RateLimited { details, .. }
            | AppError::Storage { details, .. }
            | AppError::Timeout { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let details = self.details();
        ErrorInfo {
            kind: self.kind(),
            message: self.to_string(),
            details: match details {
                Value::Object(map) if map.is_empty() => Value::Null,
                other => other.clone(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "request failed");
        }
        (status, Json(self.to_error_info())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        match e {
            sqlx::Error::PoolTimedOut => {
                AppError::timeout("Timed out waiting for a database connection", json!({}))
            }
            other => {
                tracing::error!(error = %other, "database error");
                AppError::storage("Database error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        AppError::bad_request("Request validation failed", details)
    }
}
