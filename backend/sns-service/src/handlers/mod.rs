/// HTTP handlers for sns-service endpoints
///
/// This module contains handlers for:
/// - Posts: list, create, read, update, delete (cascading to comments and likes)
/// - Comments: CRUD scoped to a parent post
/// - Likes: idempotent like/unlike returning the post
/// - Health: database-backed health and liveness probes
///
/// Every handler resolves the path resources first (404), then validates the
/// body (400), then calls into the service layer.
pub mod comments;
pub mod health;
pub mod likes;
pub mod posts;

// Re-export handler functions at module level
pub use comments::{create_comment, delete_comment, get_comment, list_comments, update_comment};
pub use health::{health_summary, liveness_check};
pub use likes::{like_post, unlike_post};
pub use posts::{create_post, delete_post, get_post, list_posts, update_post};

use crate::error::{AppError, Result};
use crate::id::is_valid_id;
use crate::models::Post;
use crate::services::PostService;
use sqlx::PgPool;

/// Resolve the `{postId}` path segment to an existing post.
/// Malformed identifiers cannot exist and are reported as not found.
pub(crate) async fn resolve_post(pool: &PgPool, post_id: &str) -> Result<Post> {
    if !is_valid_id(post_id) {
        return Err(AppError::post_not_found());
    }

    PostService::new(pool.clone()).require_post(post_id).await
}
