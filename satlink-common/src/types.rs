use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single two-line element set located in an upstream catalog response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Object name, taken from the name line or the query label
    pub name: String,
    /// First data line, always starting with "1 "
    pub line1: String,
    /// Second data line, always starting with "2 "
    pub line2: String,
    /// The whole upstream text the record was extracted from
    pub raw: String,
}

/// Best-effort descriptive metadata for a free-text name.
///
/// Optional fields serialize as `null` rather than being omitted, so clients
/// can always rely on all four keys being present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub title: String,
    pub extract: Option<String>,
    pub wikipedia_url: Option<String>,
    pub google_search_url: String,
}

impl EntityInfo {
    /// Info carrying nothing but the query name and its search link
    pub fn unresolved(name: impl Into<String>, google_search_url: impl Into<String>) -> Self {
        Self {
            title: name.into(),
            extract: None,
            wikipedia_url: None,
            google_search_url: google_search_url.into(),
        }
    }

    /// Whether any upstream lookup contributed to this info
    pub fn is_resolved(&self) -> bool {
        self.extract.is_some() || self.wikipedia_url.is_some()
    }
}

/// JSON body returned with every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Basic service information exposed on the stats endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStats {
    pub status: String,
    pub service: String,
    pub version: String,
    pub started_at: DateTime<Utc>,
}
