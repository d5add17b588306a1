//! Snapshot-to-view renderer for the Tribewatch observer.
//!
//! Given a snapshot document, the [`Renderer`] regenerates four view
//! sections -- global status, tribes, agents, timeline -- and writes them
//! into a [`RenderTarget`] it owns exclusively.
//!
//! # Architecture
//!
//! ```text
//! serde_json::Value --> sections (stage into buffers) --> RenderTarget (commit)
//! ```
//!
//! Every section decodes its own slice of the document and builds its new
//! content off-target first. A section whose data is malformed leaves its
//! region untouched, so the target never shows a half-cleared region.
//!
//! [`ViewDocument`] is the in-memory target used by the observer binary
//! and by tests.

pub mod document;
pub mod error;
pub mod format;
pub mod renderer;
pub mod sections;
pub mod target;

// Re-export primary types for convenience.
pub use document::ViewDocument;
pub use error::{RenderError, Section};
pub use renderer::Renderer;
pub use target::{Block, Region, RenderTarget, Slot};
