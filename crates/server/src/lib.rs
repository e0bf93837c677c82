//! Server crate: Axum-based web service for the harvest dashboard.
//!
//! Serves the loaded dataset to web clients as JSON: section and metric
//! selectors, assembled dashboard views, and health probes. The dataset is
//! read-only after startup, so every handler is a pure read.
//!
//! # Modules
//!
//! - [`app`]: Axum application builder and router setup
//! - [`state`]: Shared server state (the dataset behind an `Arc`)
//! - [`error`]: Unified error handling with HTTP status codes
//! - [`routes`]: HTTP route handlers (health, data)

pub mod app;
pub mod error;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use app::{ServerConfig, create_app};
pub use error::AppError;
pub use state::ServerState;
