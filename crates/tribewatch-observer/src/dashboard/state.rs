//! Shared state for the dashboard server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tribewatch_render::ViewDocument;

use crate::sync::SyncStats;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Latest published view.
    pub view: watch::Receiver<ViewDocument>,
    /// Sync cycle counters.
    pub stats: Arc<SyncStats>,
    /// Human-readable snapshot location.
    pub source: String,
    /// Poll interval, reused as the page refresh period.
    pub poll_interval: Duration,
}

impl DashboardState {
    /// Bundle the dashboard's read-only inputs.
    pub const fn new(
        view: watch::Receiver<ViewDocument>,
        stats: Arc<SyncStats>,
        source: String,
        poll_interval: Duration,
    ) -> Self {
        Self {
            view,
            stats,
            source,
            poll_interval,
        }
    }

    /// Copy of the most recently published view.
    pub fn current_view(&self) -> ViewDocument {
        self.view.borrow().clone()
    }

    /// Page refresh period in whole seconds, at least one.
    pub fn refresh_secs(&self) -> u64 {
        let millis = u64::try_from(self.poll_interval.as_millis()).unwrap_or(u64::MAX);
        millis.div_ceil(1000).max(1)
    }
}
