//! # Downlink API Server
//!
//! HTTP surface of the downlink service. Every data endpoint reads through
//! a per-resource TTL cache; the upstream is only contacted when a cache
//! window has lapsed.
//!
//! ## Endpoints
//!
//! - `GET /` - Landing page
//! - `GET /health` - Liveness and cache freshness
//! - `GET /version` - Latest version, plain text
//! - `GET /version.json` - Latest version, JSON
//! - `GET /release` - Latest release metadata
//! - `GET /commits` - Recent commits
//! - `GET /:platform` - 301 redirect to the platform's download
//!
//! ## Example
//!
//! ```rust,ignore
//! use downlink_api::{ApiServer, ServiceConfig};
//!
//! let server = ApiServer::new(ServiceConfig::from_env());
//! server.run(([0, 0, 0, 0], 3105)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, ServiceConfig};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// API server for downlink.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("downlink API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}
