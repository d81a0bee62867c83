use super::DbError;
use crate::models::Post;
use sqlx::PgExecutor;

/// List all posts in creation order
pub async fn list_posts<'e, E>(executor: E) -> Result<Vec<Post>, DbError>
where
    E: PgExecutor<'e>,
{
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, username, content, created_at, updated_at, likes
        FROM posts
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(posts)
}

/// Find a post by ID
pub async fn find_post_by_id<'e, E>(executor: E, post_id: &str) -> Result<Option<Post>, DbError>
where
    E: PgExecutor<'e>,
{
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, username, content, created_at, updated_at, likes
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(executor)
    .await?;

    Ok(post)
}

/// Lock a post row for the rest of the transaction.
/// Returns false if the post does not exist.
pub async fn lock_post<'e, E>(executor: E, post_id: &str) -> Result<bool, DbError>
where
    E: PgExecutor<'e>,
{
    let locked: Option<String> = sqlx::query_scalar(
        r#"
        SELECT id FROM posts
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(post_id)
    .fetch_optional(executor)
    .await?;

    Ok(locked.is_some())
}

/// Insert a new post with a caller-generated ID
pub async fn insert_post<'e, E>(
    executor: E,
    post_id: &str,
    username: &str,
    content: &str,
) -> Result<Post, DbError>
where
    E: PgExecutor<'e>,
{
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, username, content, created_at, updated_at, likes)
        VALUES ($1, $2, $3, NOW(), NOW(), 0)
        RETURNING id, username, content, created_at, updated_at, likes
        "#,
    )
    .bind(post_id)
    .bind(username)
    .bind(content)
    .fetch_one(executor)
    .await?;

    Ok(post)
}

/// Replace username and content of a post.
/// `updated_at` moves to the time of the write and is always strictly later
/// than its previous value.
pub async fn update_post<'e, E>(
    executor: E,
    post_id: &str,
    username: &str,
    content: &str,
) -> Result<Option<Post>, DbError>
where
    E: PgExecutor<'e>,
{
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET username = $2,
            content = $3,
            updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond')
        WHERE id = $1
        RETURNING id, username, content, created_at, updated_at, likes
        "#,
    )
    .bind(post_id)
    .bind(username)
    .bind(content)
    .fetch_optional(executor)
    .await?;

    Ok(post)
}

/// Increment the cached like counter
pub async fn increment_likes<'e, E>(executor: E, post_id: &str) -> Result<Option<Post>, DbError>
where
    E: PgExecutor<'e>,
{
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET likes = likes + 1
        WHERE id = $1
        RETURNING id, username, content, created_at, updated_at, likes
        "#,
    )
    .bind(post_id)
    .fetch_optional(executor)
    .await?;

    Ok(post)
}

/// Decrement the cached like counter, never below zero
pub async fn decrement_likes<'e, E>(executor: E, post_id: &str) -> Result<Option<Post>, DbError>
where
    E: PgExecutor<'e>,
{
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET likes = GREATEST(likes - 1, 0)
        WHERE id = $1
        RETURNING id, username, content, created_at, updated_at, likes
        "#,
    )
    .bind(post_id)
    .fetch_optional(executor)
    .await?;

    Ok(post)
}

/// Delete the post row itself. Children must already be gone.
pub async fn delete_post<'e, E>(executor: E, post_id: &str) -> Result<bool, DbError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        DELETE FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}
