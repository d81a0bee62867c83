/// Like handlers - idempotent like/unlike on a post
use super::resolve_post;
use crate::error::Result;
use crate::models::LikeRequest;
use crate::services::LikeService;
use crate::validation::validate_like;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// Like a post. Repeating the request for the same username is a no-op.
pub async fn like_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<String>,
    req: web::Json<LikeRequest>,
) -> Result<HttpResponse> {
    resolve_post(&pool, &post_id).await?;
    validate_like(&req)?;

    let service = LikeService::new((**pool).clone());
    let post = service.like_post(&post_id, &req.username).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Unlike a post. Unliking without a prior like is a no-op.
pub async fn unlike_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<String>,
    req: web::Json<LikeRequest>,
) -> Result<HttpResponse> {
    resolve_post(&pool, &post_id).await?;
    validate_like(&req)?;

    let service = LikeService::new((**pool).clone());
    let post = service.unlike_post(&post_id, &req.username).await?;

    Ok(HttpResponse::Ok().json(post))
}
