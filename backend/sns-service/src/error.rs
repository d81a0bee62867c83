/// Error types for SNS Service
///
/// Handlers return `AppError`; it is rendered as the uniform
/// `{code, message, details?}` envelope from `error-types`.
use crate::db::DbError;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use error_types::{messages, ErrorCode, ErrorResponse};
use serde_json::Value;
use thiserror::Error;

/// Result type for sns-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        details: Option<Value>,
    },

    /// Referenced resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence failure that no caller classified
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request_with_details(message: impl Into<String>, details: Value) -> Self {
        AppError::BadRequest {
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn post_not_found() -> Self {
        AppError::NotFound(messages::POST_NOT_FOUND.to_string())
    }

    pub fn comment_not_found() -> Self {
        AppError::NotFound(messages::COMMENT_NOT_FOUND.to_string())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest { .. } => ErrorCode::BadRequest,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Database(_) | AppError::Internal(_) => ErrorCode::ServerError,
        }
    }

    /// Client-facing envelope. Server errors never expose their cause.
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            AppError::BadRequest { message, details } => {
                let response = ErrorResponse::new(ErrorCode::BadRequest, message.clone());
                match details {
                    Some(details) => response.with_details(details.clone()),
                    None => response,
                }
            }
            AppError::NotFound(message) => ErrorResponse::new(ErrorCode::NotFound, message.clone()),
            AppError::Database(_) | AppError::Internal(_) => {
                ErrorResponse::new(ErrorCode::ServerError, messages::SERVER_ERROR)
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::ServerError {
            tracing::error!(error = %self, "request failed with server error");
        }

        HttpResponse::build(self.status_code()).json(self.to_response())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(DbError::from(err))
    }
}
