//! Identifier types used by the snapshot document.
//!
//! The producer emits tribe identifiers as plain integers today, but the
//! observer only ever displays them, so string identifiers are accepted as
//! well. Agents reference tribes through [`TribeId`] without any check that
//! the tribe exists (a soft reference).

use serde::{Deserialize, Serialize};

/// Identifier of a tribe, as either a JSON integer or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TribeId {
    /// Numeric identifier (the producer's default encoding).
    Number(i64),
    /// Numeric identifier above `i64::MAX`.
    Unsigned(u64),
    /// Free-form textual identifier.
    Text(String),
}

impl core::fmt::Display for TribeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TribeId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for TribeId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}
