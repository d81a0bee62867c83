/// Post handlers - HTTP endpoints for post operations
use super::resolve_post;
use crate::error::{AppError, Result};
use crate::models::PostRequest;
use crate::services::PostService;
use crate::validation::validate_authored;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// List all posts
pub async fn list_posts(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service.list_posts().await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Create a new post
pub async fn create_post(
    pool: web::Data<PgPool>,
    req: web::Json<PostRequest>,
) -> Result<HttpResponse> {
    validate_authored(&*req)?;

    let service = PostService::new((**pool).clone());
    let post = service.create_post(&req.username, &req.content).await?;

    Ok(HttpResponse::Created().json(post))
}

/// Get a post by ID
pub async fn get_post(pool: web::Data<PgPool>, post_id: web::Path<String>) -> Result<HttpResponse> {
    let post = resolve_post(&pool, &post_id).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Replace a post's username and content
pub async fn update_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<String>,
    req: web::Json<PostRequest>,
) -> Result<HttpResponse> {
    resolve_post(&pool, &post_id).await?;
    validate_authored(&*req)?;

    let service = PostService::new((**pool).clone());
    match service
        .update_post(&post_id, &req.username, &req.content)
        .await?
    {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Err(AppError::post_not_found()),
    }
}

/// Delete a post along with its comments and likes
pub async fn delete_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    resolve_post(&pool, &post_id).await?;

    let service = PostService::new((**pool).clone());
    if service.delete_post(&post_id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::post_not_found())
    }
}
