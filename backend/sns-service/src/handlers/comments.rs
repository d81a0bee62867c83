/// Comment handlers - HTTP endpoints for comment operations
use super::resolve_post;
use crate::error::{AppError, Result};
use crate::id::is_valid_id;
use crate::models::{Comment, CommentRequest};
use crate::services::CommentService;
use crate::validation::validate_authored;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// Resolve `{postId}/comments/{commentId}`: the post first, then the comment
/// under that post.
async fn resolve_comment(pool: &PgPool, post_id: &str, comment_id: &str) -> Result<Comment> {
    resolve_post(pool, post_id).await?;

    if !is_valid_id(comment_id) {
        return Err(AppError::comment_not_found());
    }

    CommentService::new(pool.clone())
        .get_comment(post_id, comment_id)
        .await?
        .ok_or_else(AppError::comment_not_found)
}

/// Get comments for a post
pub async fn list_comments(
    pool: web::Data<PgPool>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    resolve_post(&pool, &post_id).await?;

    let service = CommentService::new((**pool).clone());
    let comments = service.get_post_comments(&post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Create a new comment
pub async fn create_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<String>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    resolve_post(&pool, &post_id).await?;
    validate_authored(&*req)?;

    let service = CommentService::new((**pool).clone());
    let comment = service
        .create_comment(&post_id, &req.username, &req.content)
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Get a single comment
pub async fn get_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = resolve_comment(&pool, &post_id, &comment_id).await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// Update a comment
pub async fn update_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    resolve_comment(&pool, &post_id, &comment_id).await?;
    validate_authored(&*req)?;

    let service = CommentService::new((**pool).clone());
    match service
        .update_comment(&post_id, &comment_id, &req.username, &req.content)
        .await?
    {
        Some(comment) => Ok(HttpResponse::Ok().json(comment)),
        None => Err(AppError::comment_not_found()),
    }
}

/// Delete a comment
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    resolve_comment(&pool, &post_id, &comment_id).await?;

    let service = CommentService::new((**pool).clone());
    if service.delete_comment(&post_id, &comment_id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::comment_not_found())
    }
}
