/// Business logic layer for sns-service
///
/// This module provides high-level operations:
/// - Post service: creation with identifier retry, updates, cascading delete
/// - Comment service: comments scoped to their post
/// - Like service: idempotent like/unlike keeping `posts.likes` in step
///
/// Every mutation runs inside one explicit transaction. A transaction that is
/// dropped before `commit` is rolled back by sqlx, which covers every early
/// return and `?` exit.
pub mod comments;
pub mod likes;
pub mod posts;

// Re-export commonly used services
pub use comments::CommentService;
pub use likes::LikeService;
pub use posts::PostService;
