use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// NewType pattern for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WatchlistId(pub i64);

impl WatchlistId {
    /// Parse an opaque identifier from a path segment.
    /// Malformed input is a caller error, not a storage error.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(WatchlistId)
    }
}

impl fmt::Display for WatchlistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One tracked URL on the user's bucket list.
///
/// `url` and `short_name` are required and non-empty; any additional
/// caller-supplied fields are preserved verbatim through storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub url: String,
    #[serde(rename = "shortName")]
    pub short_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WatchlistEntry {
    pub fn is_valid(&self) -> bool {
        !self.url.trim().is_empty() && !self.short_name.trim().is_empty()
    }
}
