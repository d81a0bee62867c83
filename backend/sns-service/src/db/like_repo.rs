use super::DbError;
use crate::models::Like;
use sqlx::PgExecutor;

/// Check if a user has liked a post
pub async fn find_like_membership<'e, E>(
    executor: E,
    post_id: &str,
    username: &str,
) -> Result<bool, DbError>
where
    E: PgExecutor<'e>,
{
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM likes
            WHERE post_id = $1 AND username = $2
        )
        "#,
    )
    .bind(post_id)
    .bind(username)
    .fetch_one(executor)
    .await?;

    Ok(exists)
}

/// Insert a like row.
/// Fails with `DbError::UniqueViolation` if the pair already exists.
pub async fn insert_like<'e, E>(executor: E, post_id: &str, username: &str) -> Result<Like, DbError>
where
    E: PgExecutor<'e>,
{
    let like = sqlx::query_as::<_, Like>(
        r#"
        INSERT INTO likes (post_id, username)
        VALUES ($1, $2)
        RETURNING id, post_id, username, created_at
        "#,
    )
    .bind(post_id)
    .bind(username)
    .fetch_one(executor)
    .await?;

    Ok(like)
}

/// Delete a like row, returning whether one existed
pub async fn delete_like<'e, E>(executor: E, post_id: &str, username: &str) -> Result<bool, DbError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        DELETE FROM likes
        WHERE post_id = $1 AND username = $2
        "#,
    )
    .bind(post_id)
    .bind(username)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete every like of a post, returning how many were removed
pub async fn delete_likes_by_post<'e, E>(executor: E, post_id: &str) -> Result<u64, DbError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM likes WHERE post_id = $1")
        .bind(post_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// Count like rows for a post
pub async fn count_likes_by_post<'e, E>(executor: E, post_id: &str) -> Result<i64, DbError>
where
    E: PgExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(executor)
        .await?;

    Ok(count)
}
