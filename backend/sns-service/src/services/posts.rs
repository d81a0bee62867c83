/// Post service - handles post creation, retrieval, updates and deletion
use crate::db::{comment_repo, like_repo, post_repo, POSTS_PKEY};
use crate::error::{AppError, Result};
use crate::id::{generate_id, MAX_ID_ATTEMPTS, POST_ID_PREFIX};
use crate::models::Post;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all posts
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let posts = post_repo::list_posts(&self.pool).await?;
        Ok(posts)
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: &str) -> Result<Option<Post>> {
        let post = post_repo::find_post_by_id(&self.pool, post_id).await?;
        Ok(post)
    }

    /// Get a post by ID or fail with "Post not found"
    pub async fn require_post(&self, post_id: &str) -> Result<Post> {
        self.get_post(post_id)
            .await?
            .ok_or_else(AppError::post_not_found)
    }

    /// Create a new post.
    /// A primary key collision on the generated ID is retried with a fresh ID.
    pub async fn create_post(&self, username: &str, content: &str) -> Result<Post> {
        self.create_post_with_ids(|| generate_id(POST_ID_PREFIX), username, content)
            .await
    }

    /// Create a post drawing candidate IDs from `next_id`, at most
    /// `MAX_ID_ATTEMPTS` of them.
    pub async fn create_post_with_ids<F>(
        &self,
        mut next_id: F,
        username: &str,
        content: &str,
    ) -> Result<Post>
    where
        F: FnMut() -> String,
    {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let post_id = next_id();
            let mut tx = self.pool.begin().await?;

            match post_repo::insert_post(&mut *tx, &post_id, username, content).await {
                Ok(post) => {
                    tx.commit().await?;
                    tracing::info!(post_id = %post.id, "post created");
                    return Ok(post);
                }
                Err(err) if err.is_unique_violation_of(POSTS_PKEY) => {
                    tx.rollback().await?;
                    tracing::warn!(%post_id, attempt, "post id collision, regenerating");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(AppError::Internal(format!(
            "could not allocate a unique post id after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }

    /// Replace username and content.
    /// Returns None if the post no longer exists.
    pub async fn update_post(
        &self,
        post_id: &str,
        username: &str,
        content: &str,
    ) -> Result<Option<Post>> {
        let mut tx = self.pool.begin().await?;

        let post = post_repo::update_post(&mut *tx, post_id, username, content).await?;

        tx.commit().await?;

        if post.is_some() {
            tracing::info!(%post_id, "post updated");
        }

        Ok(post)
    }

    /// Delete a post together with its likes and comments.
    /// Returns false if the post does not exist.
    pub async fn delete_post(&self, post_id: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        // Holding the row lock blocks concurrent comment/like inserts on this
        // post until we commit; they then fail their foreign key check.
        if !post_repo::lock_post(&mut *tx, post_id).await? {
            return Ok(false);
        }

        let likes_removed = like_repo::delete_likes_by_post(&mut *tx, post_id).await?;
        let comments_removed = comment_repo::delete_comments_by_post(&mut *tx, post_id).await?;
        let deleted = post_repo::delete_post(&mut *tx, post_id).await?;

        tx.commit().await?;

        tracing::info!(
            %post_id,
            likes_removed,
            comments_removed,
            "post deleted"
        );

        Ok(deleted)
    }
}
