use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::healthcheck))
        // Switch model catalog
        .route("/api/topologies", get(handlers::topologies::list_topologies))
        .route("/api/topologies/:id", get(handlers::topologies::get_topology))
        // Planning
        .route("/api/plans", post(handlers::plans::create_plan))
        .route("/api/plans/batch", post(handlers::plans::create_plan_batch))
        .route("/api/bandwidth", post(handlers::bandwidth::audit_bandwidth))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
