//! AviationStack client error types.

/// Errors from the AviationStack HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum AviationError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not JSON
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status or an `error` object
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Endpoint is not available on the current subscription plan
    #[error("function not available on the current plan: {0}")]
    FunctionRestricted(String),

    #[error("rate limited by AviationStack API")]
    RateLimited,

    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// No API key configured
    #[error("not configured: {0}")]
    NotConfigured(String),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}
