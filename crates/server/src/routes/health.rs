//! Health check endpoints.
//!
//! - `GET /health` - Liveness probe (always 200 if server is up)
//! - `GET /health/ready` - Readiness probe (200 with ready=true when the
//!   dataset holds at least one record)

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::ServerState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: &'static str,
    /// Number of loaded records.
    pub records: usize,
    /// Rows dropped during loading.
    pub dropped_rows: usize,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether the dashboard can serve views.
    pub ready: bool,
    /// Readiness reason.
    pub reason: &'static str,
}

/// Liveness probe: `GET /health`
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        records: state.dataset.len(),
        dropped_rows: state.dataset.diagnostics().len(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Readiness probe: `GET /health/ready`
pub async fn ready(State(state): State<ServerState>) -> Json<ReadyResponse> {
    let (ready, reason) = if state.dataset.is_empty() {
        (false, "dataset is empty")
    } else {
        (true, "dataset loaded")
    };

    Json(ReadyResponse { ready, reason })
}
