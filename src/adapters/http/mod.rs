//! HTTP adapters - REST API implementations.
//!
//! `api_router` assembles the interview endpoints and the health check behind
//! the tracing, CORS and timeout layers.

pub mod interview;

use std::time::Duration;

use axum::{http::HeaderValue, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use interview::{interview_routes, ErrorResponse, InterviewHandlers};

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// CORS policy: listed origins only, or any origin when none are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(allowed)
    }
}

/// Builds the complete application router.
pub fn api_router(
    handlers: InterviewHandlers,
    cors_origins: &[String],
    request_timeout: Duration,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/interviews", interview_routes(handlers))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}
