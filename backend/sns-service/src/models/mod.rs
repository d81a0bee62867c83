/// Data models for sns-service
///
/// This module defines structures for:
/// - Post: user posts with a cached like counter
/// - Comment: comments attached to a single post
/// - Like: the (post, username) membership fact behind the counter
/// - Request bodies for the write endpoints
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Post entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes: i32,
}

/// Comment entity - always belongs to exactly one post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Like row - internal only, never serialized to clients
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Like {
    pub id: i64,
    pub post_id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Body for `POST /posts` and `PATCH /posts/{postId}`
///
/// Absent fields deserialize as empty strings so they are reported by
/// validation rather than as a malformed body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub content: String,
}

/// Body for `POST /posts/{postId}/comments` and `PATCH .../comments/{commentId}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub content: String,
}

/// Body for `POST` and `DELETE /posts/{postId}/likes`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LikeRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub username: String,
}
