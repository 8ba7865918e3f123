//! Centralized error handling.
//!
//! Provides a unified error type for the whole backend,
//! with automatic HTTP response conversion.
//!
//! "Not found" is deliberately absent from the service layer: services return
//! `Option` and the HTTP adapters turn `None` into [`AppError::NotFound`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Input errors
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Storage errors, labelled with the operation that failed
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::MalformedInput(_) => "MALFORMED_INPUT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Storage { .. } => "DATABASE_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MalformedInput(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Storage { .. } | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Process exit status when a command ends with this error.
    ///
    /// Follows the BSD `sysexits` codes.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::MalformedInput(_) | AppError::Validation(_) | AppError::BadRequest(_) => 65,
            AppError::Storage { .. } => 69,
            AppError::Internal(_) => 70,
            AppError::Config(_) => 78,
            AppError::NotFound => 1,
        }
    }

    /// Get user-facing message (hides storage internals)
    fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::MalformedInput(msg) => format!("Malformed input: {}", msg),

            AppError::Storage { context, source } => {
                tracing::error!(context = %context, "Database error: {:?}", source);
                context.to_string()
            }
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                "A configuration error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            AppError::NotFound => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        AppError::MalformedInput(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Wrap a storage error with a short label naming the failed operation.
    pub fn storage(context: &'static str, source: sea_orm::DbErr) -> Self {
        AppError::Storage { context, source }
    }
}

/// Attach a storage context label to a `sea_orm` result.
pub trait StorageContext<T> {
    fn context(self, context: &'static str) -> AppResult<T>;
}

impl<T> StorageContext<T> for Result<T, sea_orm::DbErr> {
    fn context(self, context: &'static str) -> AppResult<T> {
        self.map_err(|e| AppError::storage(context, e))
    }
}
