//! Dashboard server lifecycle management.
//!
//! [`spawn_dashboard`] binds eagerly, then serves on a background Tokio
//! task so bind failures surface at startup rather than inside the task.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::DashboardConfig;
use crate::dashboard::router::build_router;
use crate::dashboard::state::DashboardState;

/// Errors that can occur when starting or running the dashboard server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

/// Bind the dashboard and serve it on a background Tokio task.
///
/// Returns the bound address (useful when binding port 0) and the task
/// handle.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the address is invalid or already in
/// use.
pub async fn spawn_dashboard(
    config: &DashboardConfig,
    state: Arc<DashboardState>,
) -> Result<(SocketAddr, JoinHandle<()>), ServerError> {
    let listener = bind(config).await?;
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("local address unavailable: {e}")))?;

    let handle = tokio::spawn(async move {
        if let Err(e) = serve(listener, state).await {
            tracing::error!(error = %e, "dashboard server exited with error");
        }
    });

    info!(%addr, "dashboard spawned on background task");
    Ok((addr, handle))
}

async fn bind(config: &DashboardConfig) -> Result<TcpListener, ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))
}

async fn serve(listener: TcpListener, state: Arc<DashboardState>) -> Result<(), ServerError> {
    let router = build_router(state);
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "dashboard listening");
    }
    axum::serve(listener, router)
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))
}
