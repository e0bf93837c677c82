//! Shared server state.
//!
//! The dataset is loaded once before the server starts and never changes,
//! so the state is just an `Arc` around it plus a start timestamp. Clones
//! are cheap; handlers only ever read.

use std::sync::Arc;
use std::time::Instant;

use dataset::Dataset;

/// Shared state for all route handlers.
#[derive(Clone)]
pub struct ServerState {
    /// The loaded dataset; immutable after startup.
    pub dataset: Arc<Dataset>,
    /// Server start time, for uptime reporting.
    started_at: Instant,
}

impl ServerState {
    /// Wrap a loaded dataset for serving.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            started_at: Instant::now(),
        }
    }

    /// Seconds since the server started.
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_shares_dataset() {
        let state = ServerState::new(Dataset::from_records(vec![]));
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.dataset, &clone.dataset));
        assert!(state.dataset.is_empty());
    }
}
