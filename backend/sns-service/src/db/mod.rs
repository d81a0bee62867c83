/// Database access layer
///
/// This module provides:
/// - Repository functions for posts, comments and likes
/// - Classification of PostgreSQL failures into `DbError` kinds
/// - Embedded schema migrations
///
/// Repository functions accept any `PgExecutor`, so the same query runs
/// against the pool or inside a caller-owned transaction (`&mut *tx`).
pub mod comment_repo;
pub mod like_repo;
pub mod post_repo;

use sqlx::PgPool;
use thiserror::Error;

/// PostgreSQL SQLSTATE for unique_violation
pub const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for foreign_key_violation
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Primary key constraint of `posts`
pub const POSTS_PKEY: &str = "posts_pkey";

/// Primary key constraint of `comments`
pub const COMMENTS_PKEY: &str = "comments_pkey";

/// Uniqueness of (post_id, username) in `likes`
pub const UNIQUE_POST_USER_LIKE: &str = "unique_post_user_like";

/// Persistence failure kinds
#[derive(Debug, Error)]
pub enum DbError {
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    #[error(transparent)]
    Database(sqlx::Error),
}

impl DbError {
    pub fn is_unique_violation_of(&self, name: &str) -> bool {
        matches!(self, DbError::UniqueViolation { constraint } if constraint == name)
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return DbError::UniqueViolation { constraint },
                Some(FOREIGN_KEY_VIOLATION) => return DbError::ForeignKeyViolation { constraint },
                _ => {}
            }
        }

        DbError::Database(err)
    }
}

/// Apply embedded migrations from `./migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::debug!("Running database migrations");

    sqlx::migrate!("./migrations").run(pool).await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
