//! HTTP route handlers.
//!
//! - [`health`]: Liveness and readiness probes
//! - [`data`]: Dashboard sections, options, views, and dataset summary

pub mod data;
pub mod health;
