//! Client-side observer for the Tribewatch simulation.
//!
//! The simulation publishes a complete snapshot of its world as a JSON
//! document after every tick. This crate keeps a read-only view of that
//! document current:
//!
//! - **Synchronizer** ([`sync`]) fetches the snapshot on a fixed cadence,
//!   parses it, and hands it to the renderer. Failures never stop polling.
//! - **Sources** ([`source`]) read the snapshot over HTTP with a
//!   cache-defeating query parameter, or straight from a file.
//! - **Publishing target** ([`publish`]) renders into a
//!   [`ViewDocument`](tribewatch_render::ViewDocument) and broadcasts each
//!   finished pass over a [`tokio::sync::watch`] channel.
//! - **Dashboard** ([`dashboard`]) serves the latest view as an HTML page
//!   and JSON endpoints.
//!
//! # Architecture
//!
//! ```text
//! producer --> SnapshotSource --> Synchronizer --> Renderer --> PublishingDocument
//!                                                                    |
//!                                                              watch channel
//!                                                                    |
//!                                                                Dashboard
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod publish;
pub mod shutdown;
pub mod source;
pub mod sync;

// Re-export primary types for convenience.
pub use config::{DashboardConfig, ObserverConfig};
pub use error::{ConfigError, FailureKind, SyncError};
pub use publish::PublishingDocument;
pub use shutdown::wait_for_shutdown;
pub use source::{CacheBuster, SnapshotSource};
pub use sync::{SyncOutcome, SyncStats, SyncStatsSnapshot, Synchronizer, poll_cycles, run_poll_loop};
