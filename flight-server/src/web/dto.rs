//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::reference::DEFAULT_LIMIT;

/// Label reported with every autocomplete response.
pub const AUTOCOMPLETE_SOURCE: &str = "OpenFlights + Cache";

/// Query string for autocomplete endpoints.
#[derive(Debug, Deserialize)]
pub struct AutocompleteRequest {
    /// Search text
    #[serde(default)]
    pub q: String,

    /// Maximum results, kept raw so bad values fall back to the default
    pub limit: Option<String>,
}

impl AutocompleteRequest {
    /// Requested limit; missing, unparsable or zero means the default.
    pub fn limit(&self) -> usize {
        parse_limit(self.limit.as_deref(), DEFAULT_LIMIT)
    }
}

/// Optional `limit` on proxied flight searches.
#[derive(Debug, Deserialize)]
pub struct LimitRequest {
    pub limit: Option<String>,
}

impl LimitRequest {
    /// Requested limit; values that do not fit a `u32` mean the default.
    pub fn limit(&self) -> u32 {
        let default = DEFAULT_LIMIT as u32;
        u32::try_from(parse_limit(self.limit.as_deref(), DEFAULT_LIMIT)).unwrap_or(default)
    }
}

/// Parse a positive count, falling back to `default`.
pub fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

/// Autocomplete response envelope.
#[derive(Debug, Serialize)]
pub struct AutocompleteResponse<T> {
    /// Matching records
    pub data: Vec<T>,

    /// Number of records in `data`
    pub count: usize,

    /// The query as received
    pub query: String,

    /// Where the data came from
    pub source: &'static str,
}

impl<T> AutocompleteResponse<T> {
    pub fn new(data: Vec<T>, query: String) -> Self {
        Self {
            count: data.len(),
            data,
            query,
            source: AUTOCOMPLETE_SOURCE,
        }
    }
}

/// Returned instead of searching when the query is empty.
#[derive(Debug, Serialize)]
pub struct QueryTooShortResponse {
    pub data: Vec<serde_json::Value>,
    pub message: &'static str,
}

impl Default for QueryTooShortResponse {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            message: "Query too short",
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,

    /// RFC 3339 timestamp
    pub timestamp: String,

    /// Seconds since startup
    pub uptime: f64,
}

/// Cache preload response.
#[derive(Debug, Serialize)]
pub struct PreloadResponse {
    pub message: &'static str,
    pub airports_count: usize,
    pub airlines_count: usize,

    /// RFC 3339 timestamp
    pub timestamp: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
