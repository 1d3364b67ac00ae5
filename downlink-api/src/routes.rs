//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Landing page and liveness
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health_check))
        // Cached upstream views
        .route("/version", get(handlers::version_text))
        .route("/version.json", get(handlers::version_json))
        .route("/release", get(handlers::latest_release))
        .route("/commits", get(handlers::recent_commits))
        // Platform redirect, last so static routes win
        .route("/:platform", get(handlers::download))
        .with_state(state)
}
