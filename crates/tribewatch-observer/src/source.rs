//! Where snapshots come from.
//!
//! The producer publishes `state.json` either behind an HTTP server or as
//! a plain file on disk. [`SnapshotSource`] fetches the latest document
//! from either and parses it as JSON. HTTP requests carry a
//! [`CacheBuster`] query parameter so no browser or proxy cache can hand
//! back a stale document.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use reqwest::Url;
use serde_json::Value;
use tracing::trace;

use crate::error::{ConfigError, SyncError};

/// Name of the cache-defeating query parameter.
pub const CACHE_BUSTER_PARAM: &str = "_";

// ---------------------------------------------------------------------------
// Cache-buster
// ---------------------------------------------------------------------------

/// Strictly increasing wall-clock stamps in Unix milliseconds.
///
/// Two requests issued within the same millisecond (or across a backwards
/// clock step) still get distinct stamps: the next stamp is never lower
/// than the previous one plus one.
#[derive(Debug)]
pub struct CacheBuster {
    last: AtomicI64,
}

impl CacheBuster {
    /// Create a stamp generator with no history.
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(i64::MIN),
        }
    }

    /// Next stamp based on the current wall clock.
    pub fn next(&self) -> i64 {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    /// Next stamp given the clock reading `now_ms`.
    pub fn next_at(&self, now_ms: i64) -> i64 {
        let mut prev = self.last.load(Ordering::Acquire);
        loop {
            let next = now_ms.max(prev.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

impl Default for CacheBuster {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// A location the snapshot can be fetched from.
#[derive(Debug)]
pub enum SnapshotSource {
    /// HTTP(S) resource, fetched with `GET` and a cache-buster.
    Http {
        /// Shared client with default transport settings.
        client: reqwest::Client,
        /// Base URL of the snapshot, without the cache-buster.
        url: Url,
        /// Stamp generator for the cache-buster parameter.
        buster: CacheBuster,
    },
    /// File on the local filesystem.
    File {
        /// Path of the snapshot file.
        path: PathBuf,
    },
}

impl SnapshotSource {
    /// Build a source from a configured location.
    ///
    /// `http://` and `https://` select [`SnapshotSource::Http`]; `file://`
    /// URLs and anything without a scheme select [`SnapshotSource::File`].
    pub fn parse(location: &str) -> Result<Self, ConfigError> {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();

        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(location).map_err(|e| ConfigError::Source {
                location: location.to_owned(),
                message: e.to_string(),
            })?;
            return Ok(Self::http(url));
        }

        if lower.starts_with("file://") {
            let url = Url::parse(location).map_err(|e| ConfigError::Source {
                location: location.to_owned(),
                message: e.to_string(),
            })?;
            let path = url.to_file_path().map_err(|()| ConfigError::Source {
                location: location.to_owned(),
                message: String::from("not a local file path"),
            })?;
            return Ok(Self::file(path));
        }

        if location.contains("://") {
            return Err(ConfigError::Source {
                location: location.to_owned(),
                message: String::from("unsupported scheme"),
            });
        }

        if location.is_empty() {
            return Err(ConfigError::Source {
                location: location.to_owned(),
                message: String::from("empty location"),
            });
        }

        Ok(Self::file(location))
    }

    /// HTTP source with a fresh default client.
    pub fn http(url: Url) -> Self {
        Self::Http {
            client: reqwest::Client::new(),
            url,
            buster: CacheBuster::new(),
        }
    }

    /// File source.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Human-readable location for logs and the status endpoint.
    pub fn describe(&self) -> String {
        match self {
            Self::Http { url, .. } => url.to_string(),
            Self::File { path } => path.display().to_string(),
        }
    }

    /// The URL the next HTTP request would use, with a fresh cache-buster.
    ///
    /// Existing query parameters on the base URL are kept. Returns `None`
    /// for file sources.
    pub fn next_request_url(&self) -> Option<Url> {
        match self {
            Self::Http { url, buster, .. } => Some(with_cache_buster(url, buster.next())),
            Self::File { .. } => None,
        }
    }

    /// Fetch and parse the latest snapshot document.
    ///
    /// # Errors
    ///
    /// - [`SyncError::HttpStatus`] if the producer answers with a
    ///   non-success status (the body is not read)
    /// - [`SyncError::Transport`] if no response or file content arrives
    /// - [`SyncError::MalformedSnapshot`] if the body is not valid JSON
    pub async fn fetch(&self) -> Result<Value, SyncError> {
        let body = match self {
            Self::Http { client, url, buster } => {
                let request_url = with_cache_buster(url, buster.next());
                fetch_http(client, request_url).await?
            }
            Self::File { path } => {
                tokio::fs::read(path)
                    .await
                    .map_err(|e| SyncError::Transport {
                        location: path.display().to_string(),
                        message: e.to_string(),
                    })?
            }
        };

        let value = serde_json::from_slice(&body)?;
        Ok(value)
    }
}

/// Issue the GET and return the raw body of a success response.
async fn fetch_http(client: &reqwest::Client, url: Url) -> Result<Vec<u8>, SyncError> {
    trace!(%url, "requesting snapshot");

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| SyncError::Transport {
            location: url.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SyncError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let bytes = response.bytes().await.map_err(|e| SyncError::Transport {
        location: url.to_string(),
        message: format!("body read failed: {e}"),
    })?;
    Ok(bytes.to_vec())
}

/// Append `_=<stamp>` to a copy of `base`.
fn with_cache_buster(base: &Url, stamp: i64) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair(CACHE_BUSTER_PARAM, &stamp.to_string());
    url
}
