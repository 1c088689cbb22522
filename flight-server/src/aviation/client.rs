//! AviationStack HTTP client.
//!
//! Forwards query parameters to the upstream API with the access key
//! attached and hands back the JSON body untouched. A semaphore bounds how
//! many requests are in flight at once; the free plan is heavily
//! rate-limited.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::error::AviationError;

/// Default base URL for the AviationStack API.
const DEFAULT_BASE_URL: &str = "https://api.aviationstack.com/v1";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 1;

/// Error code AviationStack returns for endpoints outside the current plan.
const FUNCTION_RESTRICTED: &str = "function_access_restricted";

/// Query parameters forwarded to the API.
pub type Params = Vec<(String, String)>;

/// Upstream resource collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Flights,
    Airports,
    Airlines,
    Routes,
    Aircraft,
}

impl Endpoint {
    /// Path segment under the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Flights => "flights",
            Endpoint::Airports => "airports",
            Endpoint::Airlines => "airlines",
            Endpoint::Routes => "routes",
            Endpoint::Aircraft => "aircraft",
        }
    }
}

/// Configuration for the AviationStack client.
#[derive(Debug, Clone)]
pub struct AviationConfig {
    /// Access key; empty means not configured
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AviationConfig {
    /// Create a new config with the given access key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// AviationStack API client.
#[derive(Debug, Clone)]
pub struct AviationClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl AviationClient {
    /// Create a new client with the given configuration.
    pub fn new(config: AviationConfig) -> Result<Self, AviationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Whether an access key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Query an endpoint, returning the raw JSON body.
    pub async fn request(&self, endpoint: Endpoint, params: &Params) -> Result<Value, AviationError> {
        if !self.is_configured() {
            return Err(AviationError::NotConfigured(
                "set AVIATIONSTACK_API_KEY to enable live flight data".to_string(),
            ));
        }

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| AviationError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, endpoint.path());
        debug!(%url, ?params, "requesting AviationStack");

        let response = self
            .http
            .get(&url)
            .query(&[("access_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AviationError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AviationError::RateLimited);
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<Value>(&body);

        if let Ok(value) = &parsed
            && let Some(err) = api_error(value)
        {
            warn!(endpoint = endpoint.path(), error = %err, "AviationStack returned an error");
            return Err(err);
        }

        if !status.is_success() {
            return Err(AviationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        parsed.map_err(|e| AviationError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

/// Extract the `error` object AviationStack embeds in failed responses.
///
/// A present but falsy `error` (`null`, `false`, `0`, `""`) is not a failure.
fn api_error(body: &Value) -> Option<AviationError> {
    let error = body.get("error").filter(|e| is_truthy(e))?;
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();

    let code = error.get("code").and_then(Value::as_str);
    if code == Some(FUNCTION_RESTRICTED) {
        return Some(AviationError::FunctionRestricted(message));
    }

    Some(AviationError::Api {
        status: 0,
        message,
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn config_builder() {
        let config = AviationConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(4)
            .with_timeout(5);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 4);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = AviationConfig::new("test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let client = AviationClient::new(AviationConfig::new("")).unwrap();
        assert!(!client.is_configured());

        let result = client.request(Endpoint::Flights, &Vec::new()).await;
        assert!(matches!(result, Err(AviationError::NotConfigured(_))));
    }

    #[test]
    fn restricted_function_error() {
        let body = json!({
            "error": {
                "code": "function_access_restricted",
                "message": "Your current subscription plan does not support this API function."
            }
        });
        assert!(matches!(
            api_error(&body),
            Some(AviationError::FunctionRestricted(_))
        ));
    }

    #[test]
    fn generic_api_error() {
        let body = json!({ "error": { "code": "invalid_access_key" } });
        match api_error(&body) {
            Some(AviationError::Api { message, .. }) => assert_eq!(message, "unknown error"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn success_body_has_no_error() {
        let body = json!({ "pagination": { "count": 0 }, "data": [] });
        assert!(api_error(&body).is_none());
    }

    #[test]
    fn falsy_error_field_is_not_a_failure() {
        for error in [json!(null), json!(false), json!(0), json!("")] {
            let body = json!({ "error": error, "data": [] });
            assert!(api_error(&body).is_none(), "{body}");
        }
    }

    #[test]
    fn string_error_field_is_a_failure() {
        let body = json!({ "error": "boom" });
        assert!(matches!(api_error(&body), Some(AviationError::Api { .. })));
    }

    mod upstream {
        use std::collections::HashMap;

        use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
        use serde_json::json;

        use crate::aviation::{AviationClient, AviationConfig, AviationError, Endpoint, Params};
        use crate::test_support::serve;

        async fn client_for(app: Router) -> AviationClient {
            let base_url = serve(app).await;
            AviationClient::new(AviationConfig::new("test-key").with_base_url(base_url)).unwrap()
        }

        fn no_params() -> Params {
            Vec::new()
        }

        #[tokio::test]
        async fn success_forwards_key_and_params() {
            let app = Router::new().route(
                "/flights",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({ "data": [], "echo": q }))
                }),
            );
            let client = client_for(app).await;

            let params = vec![("dep_iata".to_string(), "GRU".to_string())];
            let body = client.request(Endpoint::Flights, &params).await.unwrap();

            assert_eq!(body["echo"]["access_key"], "test-key");
            assert_eq!(body["echo"]["dep_iata"], "GRU");
        }

        #[tokio::test]
        async fn unauthorized_status() {
            let app = Router::new().route("/flights", get(|| async { StatusCode::UNAUTHORIZED }));
            let client = client_for(app).await;

            let result = client.request(Endpoint::Flights, &no_params()).await;
            assert!(matches!(result, Err(AviationError::Unauthorized)));
        }

        #[tokio::test]
        async fn too_many_requests_status() {
            let app = Router::new().route(
                "/routes",
                get(|| async { StatusCode::TOO_MANY_REQUESTS }),
            );
            let client = client_for(app).await;

            let result = client.request(Endpoint::Routes, &no_params()).await;
            assert!(matches!(result, Err(AviationError::RateLimited)));
        }

        #[tokio::test]
        async fn other_error_status_keeps_body() {
            let app = Router::new().route(
                "/aircraft",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream broke") }),
            );
            let client = client_for(app).await;

            match client.request(Endpoint::Aircraft, &no_params()).await {
                Err(AviationError::Api { status, message }) => {
                    assert_eq!(status, 500);
                    assert_eq!(message, "upstream broke");
                }
                other => panic!("unexpected: {other:?}"),
            }
        }

        #[tokio::test]
        async fn error_object_wins_over_status() {
            let app = Router::new().route(
                "/routes",
                get(|| async {
                    (
                        StatusCode::FORBIDDEN,
                        Json(json!({
                            "error": {
                                "code": "function_access_restricted",
                                "message": "not on free plan"
                            }
                        })),
                    )
                }),
            );
            let client = client_for(app).await;

            match client.request(Endpoint::Routes, &no_params()).await {
                Err(AviationError::FunctionRestricted(message)) => {
                    assert_eq!(message, "not on free plan")
                }
                other => panic!("unexpected: {other:?}"),
            }
        }

        #[tokio::test]
        async fn error_object_on_success_status() {
            let app = Router::new().route(
                "/airlines",
                get(|| async { Json(json!({ "error": { "message": "bad query" } })) }),
            );
            let client = client_for(app).await;

            match client.request(Endpoint::Airlines, &no_params()).await {
                Err(AviationError::Api { message, .. }) => assert_eq!(message, "bad query"),
                other => panic!("unexpected: {other:?}"),
            }
        }

        #[tokio::test]
        async fn null_error_field_passes_through() {
            let app = Router::new().route(
                "/flights",
                get(|| async { Json(json!({ "error": null, "data": [1] })) }),
            );
            let client = client_for(app).await;

            let body = client.request(Endpoint::Flights, &no_params()).await.unwrap();
            assert_eq!(body["data"], json!([1]));
        }

        #[tokio::test]
        async fn non_json_success_body() {
            let app = Router::new().route("/airports", get(|| async { "<html>" }));
            let client = client_for(app).await;

            let result = client.request(Endpoint::Airports, &no_params()).await;
            assert!(matches!(result, Err(AviationError::Json { .. })));
        }
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::Flights.path(), "flights");
        assert_eq!(Endpoint::Aircraft.path(), "aircraft");
    }
}
