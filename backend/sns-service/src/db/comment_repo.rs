use super::DbError;
use crate::models::Comment;
use sqlx::PgExecutor;

/// Get all comments for a post in creation order
pub async fn list_comments_by_post<'e, E>(
    executor: E,
    post_id: &str,
) -> Result<Vec<Comment>, DbError>
where
    E: PgExecutor<'e>,
{
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, username, content, created_at, updated_at
        FROM comments
        WHERE post_id = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(executor)
    .await?;

    Ok(comments)
}

/// Get a single comment, scoped to its post
pub async fn find_comment<'e, E>(
    executor: E,
    post_id: &str,
    comment_id: &str,
) -> Result<Option<Comment>, DbError>
where
    E: PgExecutor<'e>,
{
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, username, content, created_at, updated_at
        FROM comments
        WHERE id = $1 AND post_id = $2
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .fetch_optional(executor)
    .await?;

    Ok(comment)
}

/// Create a new comment on a post with a caller-generated ID
pub async fn insert_comment<'e, E>(
    executor: E,
    comment_id: &str,
    post_id: &str,
    username: &str,
    content: &str,
) -> Result<Comment, DbError>
where
    E: PgExecutor<'e>,
{
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (id, post_id, username, content, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        RETURNING id, post_id, username, content, created_at, updated_at
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .bind(username)
    .bind(content)
    .fetch_one(executor)
    .await?;

    Ok(comment)
}

/// Replace username and content of a comment
pub async fn update_comment<'e, E>(
    executor: E,
    post_id: &str,
    comment_id: &str,
    username: &str,
    content: &str,
) -> Result<Option<Comment>, DbError>
where
    E: PgExecutor<'e>,
{
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET username = $3,
            content = $4,
            updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond')
        WHERE id = $1 AND post_id = $2
        RETURNING id, post_id, username, content, created_at, updated_at
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .bind(username)
    .bind(content)
    .fetch_optional(executor)
    .await?;

    Ok(comment)
}

/// Delete a single comment
pub async fn delete_comment<'e, E>(
    executor: E,
    post_id: &str,
    comment_id: &str,
) -> Result<bool, DbError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        DELETE FROM comments
        WHERE id = $1 AND post_id = $2
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete every comment of a post, returning how many were removed
pub async fn delete_comments_by_post<'e, E>(executor: E, post_id: &str) -> Result<u64, DbError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM comments WHERE post_id = $1")
        .bind(post_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
