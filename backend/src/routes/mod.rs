//! Route definitions for the Diet Tracker API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod analyze;
mod foods;
mod health;
mod meals;
pub mod metrics;
mod profile;
mod targets;

#[cfg(test)]
mod routes_tests;

pub use analyze::analyze_routes;
pub use foods::food_routes;
pub use meals::meal_routes;
pub use profile::profile_routes;
pub use targets::target_routes;

/// Photo analysis can take a while; everything else should be quick
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::metrics_handler))
        .nest("/api/v1", api_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Diet Tracker API v1" }))
        .nest("/targets", targets::target_routes())
        .nest("/profile", profile::profile_routes())
        .nest("/foods", foods::food_routes())
        .nest("/meals", meals::meal_routes())
        .nest("/analyze", analyze::analyze_routes())
}
