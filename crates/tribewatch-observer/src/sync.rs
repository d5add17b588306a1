//! The synchronizer: fetch, parse, render, on a fixed cadence.
//!
//! [`Synchronizer::sync_once`] runs one cycle and never fails: transport,
//! parse, and render errors are logged and absorbed, and the previously
//! rendered view stays in place. [`run_poll_loop`] calls it immediately and
//! then once per interval for the lifetime of the process.
//!
//! # Concurrency
//!
//! Each cycle runs as its own Tokio task. By default cycles may overlap
//! when a request outlives the interval, and a late response from an older
//! cycle may overwrite a newer render. Every render is a total function of
//! its own snapshot, so this is harmless. With `skip_in_flight` enabled a
//! cycle that starts while another is still running is skipped instead.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};
use tribewatch_render::{RenderTarget, Renderer};

use crate::error::{FailureKind, SyncError};
use crate::source::SnapshotSource;

// ---------------------------------------------------------------------------
// Outcome and counters
// ---------------------------------------------------------------------------

/// What happened in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The snapshot was fetched and rendered.
    Rendered {
        /// Tick of the rendered snapshot, if it carried a valid one.
        tick: Option<u64>,
    },
    /// The cycle failed; the failure was logged and the view left as is
    /// (for render failures, only the failing sections kept old content).
    Failed {
        /// Classification of the failure.
        kind: FailureKind,
    },
    /// The cycle was skipped because another was still in flight.
    Skipped,
}

/// Running counters over all cycles.
#[derive(Debug, Default)]
pub struct SyncStats {
    attempts: AtomicU64,
    rendered: AtomicU64,
    failed: AtomicU64,
    skipped: AtomicU64,
    last_tick: AtomicU64,
}

/// Point-in-time copy of [`SyncStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SyncStatsSnapshot {
    /// Cycles that issued a fetch.
    pub attempts: u64,
    /// Cycles that rendered a snapshot.
    pub rendered: u64,
    /// Cycles that failed.
    pub failed: u64,
    /// Cycles skipped because another was in flight.
    pub skipped: u64,
    /// Tick of the most recently rendered snapshot.
    pub last_tick: Option<u64>,
}

impl SyncStats {
    /// Copy the counters.
    pub fn snapshot(&self) -> SyncStatsSnapshot {
        let rendered = self.rendered.load(Ordering::Relaxed);
        SyncStatsSnapshot {
            attempts: self.attempts.load(Ordering::Relaxed),
            rendered,
            failed: self.failed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            last_tick: (rendered > 0).then(|| self.last_tick.load(Ordering::Relaxed)),
        }
    }

    fn record(&self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Rendered { tick } => {
                if let Some(tick) = tick {
                    self.last_tick.store(tick, Ordering::Relaxed);
                }
                self.rendered.fetch_add(1, Ordering::Relaxed);
            }
            SyncOutcome::Failed { .. } => {
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
            SyncOutcome::Skipped => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Synchronizer
// ---------------------------------------------------------------------------

/// Pulls snapshots from a [`SnapshotSource`] into a [`Renderer`].
#[derive(Debug)]
pub struct Synchronizer<T> {
    source: SnapshotSource,
    renderer: Mutex<Renderer<T>>,
    stats: Arc<SyncStats>,
    skip_in_flight: bool,
    in_flight: AtomicBool,
}

impl<T: RenderTarget> Synchronizer<T> {
    /// Create a synchronizer that owns the renderer (and through it the
    /// render target).
    pub fn new(source: SnapshotSource, renderer: Renderer<T>, skip_in_flight: bool) -> Self {
        Self {
            source,
            renderer: Mutex::new(renderer),
            stats: Arc::new(SyncStats::default()),
            skip_in_flight,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Shared handle to the cycle counters.
    pub fn stats(&self) -> Arc<SyncStats> {
        Arc::clone(&self.stats)
    }

    /// The configured snapshot source.
    pub const fn source(&self) -> &SnapshotSource {
        &self.source
    }

    /// Run `f` against the renderer's target while no render is running.
    pub async fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let renderer = self.renderer.lock().await;
        f(renderer.target())
    }

    /// Run one fetch-parse-render cycle.
    ///
    /// Never returns an error: failures are logged at `error` level (one
    /// event per failed cycle), counted, and reported in the outcome.
    pub async fn sync_once(&self) -> SyncOutcome {
        if self.skip_in_flight && self.in_flight.swap(true, Ordering::AcqRel) {
            debug!("previous sync still in flight, skipping");
            self.stats.record(SyncOutcome::Skipped);
            return SyncOutcome::Skipped;
        }

        self.stats.attempts.fetch_add(1, Ordering::Relaxed);

        let outcome = match self.try_sync().await {
            Ok(tick) => {
                debug!(tick, "snapshot rendered");
                SyncOutcome::Rendered { tick }
            }
            Err(e) => {
                let kind = e.kind();
                error!(
                    kind = kind.as_str(),
                    source = %self.source.describe(),
                    error = %e,
                    "snapshot sync failed, keeping previous view"
                );
                SyncOutcome::Failed { kind }
            }
        };

        self.stats.record(outcome);
        if self.skip_in_flight {
            self.in_flight.store(false, Ordering::Release);
        }
        outcome
    }

    async fn try_sync(&self) -> Result<Option<u64>, SyncError> {
        let snapshot: Value = self.source.fetch().await?;
        let tick = snapshot.get("tick").and_then(Value::as_u64);
        self.renderer.lock().await.render(&snapshot)?;
        Ok(tick)
    }
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

/// Poll forever: one cycle immediately, then one per `period`.
///
/// `period` must be non-zero.
pub async fn run_poll_loop<T>(sync: Arc<Synchronizer<T>>, period: Duration)
where
    T: RenderTarget + 'static,
{
    info!(
        source = %sync.source().describe(),
        interval_ms = period.as_millis(),
        "poll loop started"
    );
    poll(sync, period, None).await;
}

/// Run exactly `cycles` cycles on the same cadence, then wait for all of
/// them to finish.
pub async fn poll_cycles<T>(sync: Arc<Synchronizer<T>>, period: Duration, cycles: u64)
where
    T: RenderTarget + 'static,
{
    poll(sync, period, Some(cycles)).await;
}

async fn poll<T>(sync: Arc<Synchronizer<T>>, period: Duration, limit: Option<u64>)
where
    T: RenderTarget + 'static,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut tasks = JoinSet::new();
    let mut started: u64 = 0;

    while limit.is_none_or(|max| started < max) {
        // The first tick completes immediately.
        ticker.tick().await;

        // Reap finished cycles so the set does not grow without bound.
        while tasks.try_join_next().is_some() {}

        let sync = Arc::clone(&sync);
        tasks.spawn(async move { sync.sync_once().await });
        started = started.saturating_add(1);
    }

    while tasks.join_next().await.is_some() {}
}
