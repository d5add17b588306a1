//! Error types for the observer.
//!
//! [`SyncError`] covers everything that can go wrong in one
//! synchronization cycle. None of it escapes
//! [`Synchronizer::sync_once`](crate::sync::Synchronizer::sync_once):
//! failures are logged and the previous view stays on screen.

use tribewatch_render::RenderError;

/// Coarse classification of a failed cycle, for logs and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The snapshot could not be retrieved.
    Transport,
    /// The body was not valid JSON.
    MalformedSnapshot,
    /// A section could not format its part of the snapshot.
    Render,
}

impl FailureKind {
    /// Lowercase name used in log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::MalformedSnapshot => "malformed_snapshot",
            Self::Render => "render",
        }
    }
}

/// Errors that can occur during one synchronization cycle.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The producer answered with a non-success HTTP status. The body is
    /// not read.
    #[error("snapshot request to {url} returned {status}")]
    HttpStatus {
        /// The requested URL, including the cache-buster.
        url: String,
        /// The status the producer returned.
        status: reqwest::StatusCode,
    },

    /// The request never produced a response (connection refused, DNS,
    /// reset, unreadable file).
    #[error("snapshot transport failed for {location}: {message}")]
    Transport {
        /// URL or file path that was read.
        location: String,
        /// Description of the underlying failure.
        message: String,
    },

    /// The body is not valid JSON.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(#[from] serde_json::Error),

    /// Rendering failed for at least one section.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

impl SyncError {
    /// Classify the error.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::HttpStatus { .. } | Self::Transport { .. } => FailureKind::Transport,
            Self::MalformedSnapshot(_) => FailureKind::MalformedSnapshot,
            Self::Render(_) => FailureKind::Render,
        }
    }
}

/// Configuration is invalid or missing.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed.
    #[error("invalid {name}: {message}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The snapshot location is neither an HTTP URL nor a usable path.
    #[error("invalid snapshot location {location}: {message}")]
    Source {
        /// The configured location.
        location: String,
        /// What was wrong with it.
        message: String,
    },
}
