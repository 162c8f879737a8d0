//! Route definitions for the relay API.

use axum::routing::{get, post};
use axum::Router;

use crate::{handlers, middleware, state::AppState};

/// Create the main API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/llm", post(handlers::completion))
        .route("/health", get(handlers::health_check))
        .route("/live", get(handlers::liveness_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/providers", get(handlers::list_providers))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(middleware::cors_layer())
        .with_state(state)
}
