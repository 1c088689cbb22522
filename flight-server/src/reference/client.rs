//! OpenFlights open-data client.

use std::time::Duration;

use futures::future::BoxFuture;

use super::error::ReferenceError;

/// Default base URL for the OpenFlights data files.
const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/jpatokal/openflights/master/data";

/// Default fetch timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which bulk reference file to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Airports,
    Airlines,
}

impl Dataset {
    /// File name on the open-data host.
    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::Airports => "airports.dat",
            Dataset::Airlines => "airlines.dat",
        }
    }
}

/// Fetches the raw bytes of a reference file.
///
/// The loader only depends on this seam, so tests can substitute a
/// scripted source.
pub trait TextFetcher: Send + Sync {
    fn fetch(&self, dataset: Dataset) -> BoxFuture<'_, Result<Vec<u8>, ReferenceError>>;
}

/// Configuration for the OpenFlights client.
#[derive(Debug, Clone)]
pub struct OpenFlightsConfig {
    /// Base URL the `.dat` files are resolved against
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OpenFlightsConfig {
    /// Set a custom base URL (for mirrors and testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OpenFlightsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// HTTP client for the OpenFlights data files.
#[derive(Debug, Clone)]
pub struct OpenFlightsClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenFlightsClient {
    /// Create a new client.
    pub fn new(config: OpenFlightsConfig) -> Result<Self, ReferenceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of a dataset file.
    pub fn url(&self, dataset: Dataset) -> String {
        format!("{}/{}", self.base_url, dataset.file_name())
    }

    async fn fetch_bytes(&self, dataset: Dataset) -> Result<Vec<u8>, ReferenceError> {
        let url = self.url(dataset);
        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ReferenceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl TextFetcher for OpenFlightsClient {
    fn fetch(&self, dataset: Dataset) -> BoxFuture<'_, Result<Vec<u8>, ReferenceError>> {
        Box::pin(self.fetch_bytes(dataset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OpenFlightsConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_builder() {
        let config = OpenFlightsConfig::default()
            .with_base_url("http://localhost:8080/data/")
            .with_timeout(2);
        assert_eq!(config.base_url, "http://localhost:8080/data/");
        assert_eq!(config.timeout_secs, 2);
    }

    #[test]
    fn dataset_urls() {
        let config = OpenFlightsConfig::default().with_base_url("http://localhost:8080/data/");
        let client = OpenFlightsClient::new(config).unwrap();

        assert_eq!(
            client.url(Dataset::Airports),
            "http://localhost:8080/data/airports.dat"
        );
        assert_eq!(
            client.url(Dataset::Airlines),
            "http://localhost:8080/data/airlines.dat"
        );
    }
}
