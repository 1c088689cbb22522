//! Reference data error types.

/// Errors that can occur while obtaining raw reference data.
///
/// None of these escape the loader: every variant triggers the fallback set.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// HTTP request failed (connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("unexpected status {status} fetching {url}")]
    Status { status: u16, url: String },

    /// Body could not be decoded as text
    #[error("response body is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),
}
