//! Prometheus metrics for sns-service.
//!
//! Exposes like/unlike outcome counters and an HTTP handler for the `/metrics` endpoint.

use actix_web::HttpResponse;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

lazy_static::lazy_static! {
    /// Like/unlike calls by outcome
    static ref LIKE_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "sns_like_operations_total",
        "Like and unlike operations by outcome",
        &["operation", "outcome"]
    ).expect("Prometheus metrics registration should succeed at startup");
}

/// What a like or unlike call ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    /// A new like row was written
    Created,
    /// The pair was already liked; nothing changed
    Duplicate,
    /// An existing like row was removed
    Removed,
    /// Nothing to remove
    Noop,
}

impl LikeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeOutcome::Created => "created",
            LikeOutcome::Duplicate => "duplicate",
            LikeOutcome::Removed => "removed",
            LikeOutcome::Noop => "noop",
        }
    }
}

pub fn record_like_operation(operation: &str, outcome: LikeOutcome) {
    LIKE_OPERATIONS_TOTAL
        .with_label_values(&[operation, outcome.as_str()])
        .inc();
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
