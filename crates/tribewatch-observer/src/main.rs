//! Observer entry point for the Tribewatch simulation.
//!
//! Loads configuration from the environment, starts the dashboard, and
//! polls the producer's snapshot until interrupted.

use std::sync::Arc;

use anyhow::Context as _;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tribewatch_observer::dashboard::{DashboardState, spawn_dashboard};
use tribewatch_observer::{
    ObserverConfig, PublishingDocument, SnapshotSource, Synchronizer, run_poll_loop,
    wait_for_shutdown,
};
use tribewatch_render::Renderer;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the dashboard cannot
/// bind its address.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("tribewatch observer starting");

    let config = ObserverConfig::from_env().context("failed to load configuration")?;
    info!(
        snapshot_url = %config.snapshot_url,
        poll_interval_ms = config.poll_interval.as_millis(),
        skip_in_flight = config.skip_in_flight,
        "configuration loaded"
    );

    let source = SnapshotSource::parse(&config.snapshot_url)
        .context("failed to resolve snapshot source")?;

    let (target, view) = PublishingDocument::new();
    let sync = Arc::new(Synchronizer::new(
        source,
        Renderer::new(target),
        config.skip_in_flight,
    ));

    let state = Arc::new(DashboardState::new(
        view,
        sync.stats(),
        sync.source().describe(),
        config.poll_interval,
    ));
    let (addr, dashboard) = spawn_dashboard(&config.dashboard, state)
        .await
        .context("failed to start dashboard")?;
    info!(%addr, "dashboard available");

    let poller = tokio::spawn(run_poll_loop(Arc::clone(&sync), config.poll_interval));

    tokio::select! {
        () = wait_for_shutdown(tokio::signal::ctrl_c()) => {}
        result = poller => {
            if let Err(e) = result {
                warn!(error = %e, "poll loop task ended unexpectedly");
            }
        }
    }

    dashboard.abort();
    let stats = sync.stats().snapshot();
    info!(
        attempts = stats.attempts,
        rendered = stats.rendered,
        failed = stats.failed,
        skipped = stats.skipped,
        "tribewatch observer stopped"
    );
    Ok(())
}
