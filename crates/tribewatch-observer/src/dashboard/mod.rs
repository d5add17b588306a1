//! Dashboard server hosting the rendered view.
//!
//! The dashboard is the host page for the renderer's output: it exposes
//! the five insertion points (`tick`, `weather`, `tribes`, `agents`,
//! `timeline`) by stable element id, plus JSON endpoints for the view and
//! the sync counters. It only reads published views and never touches the
//! render target.

pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use router::build_router;
pub use server::{ServerError, spawn_dashboard};
pub use state::DashboardState;
