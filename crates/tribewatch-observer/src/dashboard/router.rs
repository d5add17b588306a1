//! Axum router construction for the dashboard.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::dashboard::handlers;
use crate::dashboard::state::DashboardState;

/// Build the complete Axum router for the dashboard.
///
/// The router includes:
/// - `GET /` -- host page with the rendered regions
/// - `GET /api/view` -- current view as JSON
/// - `GET /api/status` -- sync counters
///
/// CORS allows any origin so the view can be embedded elsewhere.
pub fn build_router(state: Arc<DashboardState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/view", get(handlers::get_view))
        .route("/api/status", get(handlers::get_status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
