//! Process shutdown signal.

use std::future::Future;

use tracing::{info, warn};

/// Resolve when `signal` reports a shutdown request.
///
/// If the signal cannot be listened for, the failure is logged and this
/// future never resolves, so the observer keeps polling instead of exiting
/// right after startup.
pub async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            warn!(error = %e, "failed to listen for shutdown signal, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
