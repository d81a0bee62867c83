//! Uniform API error envelope shared by the SNS backend services.
//!
//! Every failed request is answered with the same body shape:
//!
//! ```json
//! { "code": "NOT_FOUND", "message": "Post not found" }
//! ```
//!
//! `details` is optional and only carries client-facing context (for example
//! which request fields failed validation). Internal causes never go there.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable error codes exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing or malformed input (400)
    BadRequest,
    /// Referenced resource does not exist (404)
    NotFound,
    /// Unclassified failure on the server side (500)
    ServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ServerError => "SERVER_ERROR",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ErrorCode::BadRequest => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::ServerError => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error body returned by every endpoint on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (one of `BAD_REQUEST`, `NOT_FOUND`, `SERVER_ERROR`)
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,

    /// Optional additional context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn status_code(&self) -> u16 {
        self.code.status_code()
    }
}

/// Standard messages shared by handlers
pub mod messages {
    pub const INVALID_REQUIRED_FIELDS: &str = "Invalid input for required fields.";
    pub const INVALID_REQUEST_BODY: &str = "Invalid request body.";
    pub const POST_NOT_FOUND: &str = "Post not found";
    pub const COMMENT_NOT_FOUND: &str = "Comment not found";
    pub const RESOURCE_NOT_FOUND: &str = "Resource not found";
    pub const SERVER_ERROR: &str = "An unexpected error occurred.";

    /// Message for a single invalid required field, e.g. `username`.
    pub fn invalid_required_field(field: &str) -> String {
        format!("Invalid input for required field '{}'.", field)
    }
}
