//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::ingest::TransactionStore;
use crate::snapshot::AggregateSnapshot;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Transactions loaded at startup, read-only afterwards
    pub store: Arc<TransactionStore>,
    /// Snapshot computed from the store at startup
    pub summary: Arc<AggregateSnapshot>,
    /// Pre-built snapshot document served instead of the computed one
    pub snapshot_file: Option<PathBuf>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state over a loaded store, summarizing it once
    pub fn new(store: TransactionStore, config: ApiConfig) -> Self {
        let summary = store.summarize();
        tracing::debug!(
            transactions = summary.total_transactions,
            types = summary.by_type.len(),
            months = summary.monthly_totals.len(),
            "Computed snapshot"
        );

        Self {
            store: Arc::new(store),
            summary: Arc::new(summary),
            snapshot_file: None,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Serve a snapshot document from disk instead of the computed one
    pub fn with_snapshot_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_file = Some(path.into());
        self
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
