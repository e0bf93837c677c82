//! Axum application builder.
//!
//! Configures routes, middleware, and state for the dashboard server.
//!
//! # Routes
//!
//! - `GET /health` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /api/sections` - Section dropdown
//! - `GET /api/analysis/options` - Metric dropdown per section
//! - `GET /api/dashboard/view` - Full dashboard view
//! - `GET /api/dataset/summary` - Dataset shape and diagnostics

use axum::Router;
use axum::routing::get;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{data, health};
use crate::state::ServerState;

/// Create the Axum application with all routes.
pub fn create_app(state: ServerState) -> Router {
    // CORS layer for frontend development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        // Health endpoints
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        // Dashboard API
        .route("/api/sections", get(data::get_sections))
        .route("/api/analysis/options", get(data::get_options))
        .route("/api/dashboard/view", get(data::get_view))
        .route("/api/dataset/summary", get(data::get_summary))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // State
        .with_state(state)
}

/// Server configuration.
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Host to bind to.
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8060,
            host: "0.0.0.0".into(),
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("HARVEST_SERVER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8060);

        let host = std::env::var("HARVEST_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());

        Self { port, host }
    }

    /// Get bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
