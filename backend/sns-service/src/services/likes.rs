/// Like service - idempotent like/unlike
///
/// `posts.likes` is a cache of the like-row count. It is only ever changed in
/// the same transaction that inserts or deletes the matching like row.
/// Every transaction that touches like rows locks the post row first, so
/// like, unlike and post deletion serialize per post.
/// `unique_post_user_like` still guards the (post, username) pair.
use crate::db::{like_repo, post_repo, DbError, UNIQUE_POST_USER_LIKE};
use crate::error::{AppError, Result};
use crate::metrics::{record_like_operation, LikeOutcome};
use crate::models::Post;
use sqlx::{PgExecutor, PgPool};

#[derive(Clone)]
pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Like a post. Liking an already-liked post changes nothing and still
    /// returns the current post.
    pub async fn like_post(&self, post_id: &str, username: &str) -> Result<Post> {
        let mut tx = self.pool.begin().await?;

        // Post row first, like rows second: the same order as post deletion.
        if !post_repo::lock_post(&mut *tx, post_id).await? {
            return Err(AppError::post_not_found());
        }

        if like_repo::find_like_membership(&mut *tx, post_id, username).await? {
            let post = Self::current_post(&mut *tx, post_id).await?;
            tx.commit().await?;
            record_like_operation("like", LikeOutcome::Duplicate);
            return Ok(post);
        }

        match like_repo::insert_like(&mut *tx, post_id, username).await {
            Ok(like) => {
                tracing::debug!(like_id = like.id, %post_id, %username, "like row inserted");
            }
            Err(err) if err.is_unique_violation_of(UNIQUE_POST_USER_LIKE) => {
                // Another request inserted the same pair after our membership check.
                tx.rollback().await?;
                tracing::debug!(%post_id, %username, "concurrent duplicate like absorbed");
                record_like_operation("like", LikeOutcome::Duplicate);
                return Self::current_post(&self.pool, post_id).await;
            }
            Err(DbError::ForeignKeyViolation { .. }) => {
                return Err(AppError::post_not_found());
            }
            Err(err) => return Err(err.into()),
        }

        let post = post_repo::increment_likes(&mut *tx, post_id)
            .await?
            .ok_or_else(AppError::post_not_found)?;

        tx.commit().await?;

        record_like_operation("like", LikeOutcome::Created);
        tracing::info!(%post_id, likes = post.likes, "post liked");

        Ok(post)
    }

    /// Unlike a post. Unliking a post that was not liked changes nothing and
    /// still returns the current post.
    pub async fn unlike_post(&self, post_id: &str, username: &str) -> Result<Post> {
        let mut tx = self.pool.begin().await?;

        if !post_repo::lock_post(&mut *tx, post_id).await? {
            return Err(AppError::post_not_found());
        }

        if !like_repo::delete_like(&mut *tx, post_id, username).await? {
            let post = Self::current_post(&mut *tx, post_id).await?;
            tx.commit().await?;
            tracing::debug!(%post_id, %username, "unlike without existing like");
            record_like_operation("unlike", LikeOutcome::Noop);
            return Ok(post);
        }

        let post = post_repo::decrement_likes(&mut *tx, post_id)
            .await?
            .ok_or_else(AppError::post_not_found)?;

        tx.commit().await?;

        record_like_operation("unlike", LikeOutcome::Removed);
        tracing::info!(%post_id, likes = post.likes, "post unliked");

        Ok(post)
    }

    async fn current_post<'e, E>(executor: E, post_id: &str) -> Result<Post>
    where
        E: PgExecutor<'e>,
    {
        post_repo::find_post_by_id(executor, post_id)
            .await?
            .ok_or_else(AppError::post_not_found)
    }
}
