/// Request body validation for write endpoints
///
/// Two layers run in order: the `validator` derive rules on the request
/// types, then an explicit non-empty check on the required fields. Both
/// answer with the same code and message.
use crate::error::{AppError, Result};
use crate::models::{CommentRequest, LikeRequest, PostRequest};
use error_types::messages;
use serde_json::{json, Value};
use validator::{Validate, ValidationErrors};

/// A write body carrying an author and a text
pub trait AuthoredInput: Validate {
    fn username(&self) -> &str;
    fn content(&self) -> &str;
}

impl AuthoredInput for PostRequest {
    fn username(&self) -> &str {
        &self.username
    }

    fn content(&self) -> &str {
        &self.content
    }
}

impl AuthoredInput for CommentRequest {
    fn username(&self) -> &str {
        &self.username
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// Validate a post or comment body: `username` and `content` must be non-empty.
pub fn validate_authored<T: AuthoredInput>(input: &T) -> Result<()> {
    if let Err(errors) = input.validate() {
        return Err(AppError::bad_request_with_details(
            messages::INVALID_REQUIRED_FIELDS,
            invalid_fields(&errors),
        ));
    }

    if input.username().is_empty() || input.content().is_empty() {
        return Err(AppError::bad_request(messages::INVALID_REQUIRED_FIELDS));
    }

    Ok(())
}

/// Validate a like/unlike body: `username` must be non-empty.
pub fn validate_like(input: &LikeRequest) -> Result<()> {
    let message = messages::invalid_required_field("username");

    if let Err(errors) = input.validate() {
        return Err(AppError::bad_request_with_details(
            message,
            invalid_fields(&errors),
        ));
    }

    if input.username.is_empty() {
        return Err(AppError::bad_request(message));
    }

    Ok(())
}

fn invalid_fields(errors: &ValidationErrors) -> Value {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();

    json!({ "fields": fields })
}
