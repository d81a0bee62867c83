/// Route table for sns-service
///
/// Shared by the binary and the integration tests so both serve exactly the
/// same application.
use crate::error::AppError;
use crate::handlers;
use crate::metrics::serve_metrics;
use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use error_types::{messages, ErrorCode, ErrorResponse};
use serde_json::json;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/metrics", web::get().to(serve_metrics))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health_summary))
                .route("/health/live", web::get().to(handlers::liveness_check))
                .service(
                    web::scope("/posts")
                        .service(
                            web::resource("")
                                .route(web::get().to(handlers::list_posts))
                                .route(web::post().to(handlers::create_post)),
                        )
                        .service(
                            web::resource("/{post_id}")
                                .route(web::get().to(handlers::get_post))
                                .route(web::patch().to(handlers::update_post))
                                .route(web::delete().to(handlers::delete_post)),
                        )
                        .service(
                            web::resource("/{post_id}/comments")
                                .route(web::get().to(handlers::list_comments))
                                .route(web::post().to(handlers::create_comment)),
                        )
                        .service(
                            web::resource("/{post_id}/comments/{comment_id}")
                                .route(web::get().to(handlers::get_comment))
                                .route(web::patch().to(handlers::update_comment))
                                .route(web::delete().to(handlers::delete_comment)),
                        )
                        .service(
                            web::resource("/{post_id}/likes")
                                .route(web::post().to(handlers::like_post))
                                .route(web::delete().to(handlers::unlike_post)),
                        ),
                ),
        )
        .default_service(web::route().to(not_found));
}

/// Malformed JSON bodies are answered with the uniform error envelope.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        tracing::debug!(error = %err, "rejected request body");
        AppError::bad_request_with_details(
            messages::INVALID_REQUEST_BODY,
            json!({ "reason": err.to_string() }),
        )
        .into()
    })
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        ErrorCode::NotFound,
        messages::RESOURCE_NOT_FOUND,
    ))
}
