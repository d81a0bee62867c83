/// Comment service - handles comment creation, retrieval, and management
use crate::db::{comment_repo, DbError, COMMENTS_PKEY};
use crate::error::{AppError, Result};
use crate::id::{generate_id, COMMENT_ID_PREFIX, MAX_ID_ATTEMPTS};
use crate::models::Comment;
use sqlx::PgPool;

#[derive(Clone)]
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get comments for a post
    pub async fn get_post_comments(&self, post_id: &str) -> Result<Vec<Comment>> {
        let comments = comment_repo::list_comments_by_post(&self.pool, post_id).await?;
        Ok(comments)
    }

    /// Get a comment by ID, scoped to its post
    pub async fn get_comment(&self, post_id: &str, comment_id: &str) -> Result<Option<Comment>> {
        let comment = comment_repo::find_comment(&self.pool, post_id, comment_id).await?;
        Ok(comment)
    }

    /// Create a new comment.
    /// Fails with "Post not found" if the post disappeared before the insert.
    pub async fn create_comment(
        &self,
        post_id: &str,
        username: &str,
        content: &str,
    ) -> Result<Comment> {
        self.create_comment_with_ids(|| generate_id(COMMENT_ID_PREFIX), post_id, username, content)
            .await
    }

    /// Create a comment drawing candidate IDs from `next_id`, at most
    /// `MAX_ID_ATTEMPTS` of them.
    pub async fn create_comment_with_ids<F>(
        &self,
        mut next_id: F,
        post_id: &str,
        username: &str,
        content: &str,
    ) -> Result<Comment>
    where
        F: FnMut() -> String,
    {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let comment_id = next_id();
            let mut tx = self.pool.begin().await?;

            match comment_repo::insert_comment(&mut *tx, &comment_id, post_id, username, content)
                .await
            {
                Ok(comment) => {
                    tx.commit().await?;
                    tracing::info!(%post_id, comment_id = %comment.id, "comment created");
                    return Ok(comment);
                }
                Err(err) if err.is_unique_violation_of(COMMENTS_PKEY) => {
                    tx.rollback().await?;
                    tracing::warn!(%comment_id, attempt, "comment id collision, regenerating");
                }
                Err(DbError::ForeignKeyViolation { .. }) => {
                    return Err(AppError::post_not_found());
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(AppError::Internal(format!(
            "could not allocate a unique comment id after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }

    /// Update comment content.
    /// Returns None if the comment no longer exists under this post.
    pub async fn update_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        username: &str,
        content: &str,
    ) -> Result<Option<Comment>> {
        let mut tx = self.pool.begin().await?;

        let comment =
            comment_repo::update_comment(&mut *tx, post_id, comment_id, username, content).await?;

        tx.commit().await?;

        Ok(comment)
    }

    /// Delete a comment
    pub async fn delete_comment(&self, post_id: &str, comment_id: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let deleted = comment_repo::delete_comment(&mut *tx, post_id, comment_id).await?;

        tx.commit().await?;

        if deleted {
            tracing::info!(%post_id, %comment_id, "comment deleted");
        }

        Ok(deleted)
    }
}
