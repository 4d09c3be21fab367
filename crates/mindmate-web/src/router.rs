//! Axum router - maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::handlers::{
    analyze::analyze,
    catalog::{doctors, sleep_tips},
    genai::genai,
    knowledge::search,
    selfcheck::selfcheck,
    system::health,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
/// `body_limit` caps request bodies in bytes.
pub fn build_router(state: AppState, body_limit: usize) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Reference data
        .route("/api/health",     get(health))
        .route("/api/doctors",    get(doctors))
        .route("/api/sleep-tips", get(sleep_tips))
        .route("/api/knowledge",  get(search))

        // Triage
        .route("/api/analyze",    post(analyze))
        .route("/api/genai",      post(genai))
        .route("/api/selfcheck",  post(selfcheck))

        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
