//! Caching layer for AviationStack responses.
//!
//! The upstream quota is small, so identical requests inside a short window
//! are answered from memory. Keys are the endpoint plus the query parameters
//! in sorted order, so parameter order in the inbound URL does not matter.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use serde_json::Value;
use tracing::debug;

use super::client::{AviationClient, Endpoint, Params};
use super::error::AviationError;

/// Cached response body.
type ProxyEntry = Arc<Value>;

/// Configuration for the proxy cache.
#[derive(Debug, Clone)]
pub struct ProxyCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for ProxyCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 500,
        }
    }
}

/// AviationStack client with response caching.
pub struct CachedAviationClient {
    client: AviationClient,
    responses: MokaCache<String, ProxyEntry>,
}

impl CachedAviationClient {
    /// Create a new cached client.
    pub fn new(client: AviationClient, cache_config: &ProxyCacheConfig) -> Self {
        let responses = MokaCache::builder()
            .time_to_live(cache_config.ttl)
            .max_capacity(cache_config.max_capacity)
            .build();

        Self { client, responses }
    }

    /// Query an endpoint, using the cache if available.
    pub async fn get(&self, endpoint: Endpoint, params: Params) -> Result<ProxyEntry, AviationError> {
        let key = cache_key(endpoint, &params);

        if let Some(cached) = self.responses.get(&key).await {
            debug!(%key, "serving AviationStack response from cache");
            return Ok(cached);
        }

        let body = Arc::new(self.client.request(endpoint, &params).await?);
        self.responses.insert(key, body.clone()).await;

        Ok(body)
    }

    /// Real-time flights.
    pub async fn flights(&self, params: Params) -> Result<ProxyEntry, AviationError> {
        self.get(Endpoint::Flights, params).await
    }

    /// Airports from the upstream API.
    pub async fn airports(&self, params: Params) -> Result<ProxyEntry, AviationError> {
        self.get(Endpoint::Airports, params).await
    }

    /// Airlines from the upstream API.
    pub async fn airlines(&self, params: Params) -> Result<ProxyEntry, AviationError> {
        self.get(Endpoint::Airlines, params).await
    }

    /// Scheduled routes.
    pub async fn routes(&self, params: Params) -> Result<ProxyEntry, AviationError> {
        self.get(Endpoint::Routes, params).await
    }

    /// Aircraft registry.
    pub async fn aircraft(&self, params: Params) -> Result<ProxyEntry, AviationError> {
        self.get(Endpoint::Aircraft, params).await
    }

    /// Flights operated by one airline.
    pub async fn flights_by_airline(
        &self,
        airline_iata: &str,
        limit: u32,
    ) -> Result<ProxyEntry, AviationError> {
        self.flights(vec![
            ("airline_iata".to_string(), airline_iata.to_string()),
            ("limit".to_string(), limit.to_string()),
        ])
        .await
    }

    /// Flights between two airports.
    pub async fn flights_by_route(
        &self,
        departure_iata: &str,
        arrival_iata: &str,
        limit: u32,
    ) -> Result<ProxyEntry, AviationError> {
        self.flights(vec![
            ("dep_iata".to_string(), departure_iata.to_string()),
            ("arr_iata".to_string(), arrival_iata.to_string()),
            ("limit".to_string(), limit.to_string()),
        ])
        .await
    }

    /// Upstream airport search by code.
    pub async fn airport_by_code(&self, code: &str) -> Result<ProxyEntry, AviationError> {
        self.airports(vec![("search".to_string(), code.to_string())])
            .await
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &AviationClient {
        &self.client
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.responses.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.responses.invalidate_all();
    }
}

/// Cache key: `endpoint?k1=v1&k2=v2` with parameters sorted.
fn cache_key(endpoint: Endpoint, params: &Params) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort();

    let query: Vec<String> = sorted.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{}?{}", endpoint.path(), query.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aviation::AviationConfig;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn cache_key_ignores_parameter_order() {
        let a = cache_key(Endpoint::Flights, &params(&[("dep_iata", "GRU"), ("limit", "10")]));
        let b = cache_key(Endpoint::Flights, &params(&[("limit", "10"), ("dep_iata", "GRU")]));
        assert_eq!(a, b);
        assert_eq!(a, "flights?dep_iata=GRU&limit=10");
    }

    #[test]
    fn cache_key_distinguishes_endpoints() {
        let p = params(&[("search", "GRU")]);
        assert_ne!(
            cache_key(Endpoint::Airports, &p),
            cache_key(Endpoint::Airlines, &p)
        );
    }

    #[test]
    fn default_config() {
        let config = ProxyCacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 500);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let client = AviationClient::new(AviationConfig::new("")).unwrap();
        let cached = CachedAviationClient::new(client, &ProxyCacheConfig::default());

        assert!(cached.flights_by_airline("AA", 10).await.is_err());
        cached.responses.run_pending_tasks().await;
        assert_eq!(cached.cache_entry_count(), 0);
    }
}
