//! Reference data loader: cache check, fetch, parse, fall back.
//!
//! Loading never fails from the caller's point of view. Transport and decode
//! errors are logged and replaced by the built-in fallback set, which is then
//! cached for a full TTL just like live data. A body that decodes and parses
//! to zero records is *not* a failure and is cached as-is.
//!
//! There is no single-flight guard: two requests that both see an expired
//! entry will both fetch, and the later write wins.

use std::sync::Arc;

use tracing::{info, warn};

use super::cache::{AIRLINES_KEY, AIRPORTS_KEY, ReferenceCache, TtlCache};
use super::client::{Dataset, TextFetcher};
use super::error::ReferenceError;
use super::fallback::{fallback_airlines, fallback_airports};
use super::parse::{parse_airlines, parse_airports};
use super::record::{AirlineRecord, AirportRecord};

/// Record counts after a preload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadSummary {
    pub airports: usize,
    pub airlines: usize,
}

/// Populates the shared [`ReferenceCache`] from an open-data source.
#[derive(Clone)]
pub struct ReferenceLoader {
    fetcher: Arc<dyn TextFetcher>,
    cache: Arc<ReferenceCache>,
}

impl ReferenceLoader {
    /// Create a loader writing into `cache`.
    pub fn new(fetcher: impl TextFetcher + 'static, cache: Arc<ReferenceCache>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            cache,
        }
    }

    /// The cache this loader writes to.
    pub fn cache(&self) -> &Arc<ReferenceCache> {
        &self.cache
    }

    /// Airports, from cache when fresh, otherwise freshly fetched.
    pub async fn load_airports(&self) -> Arc<Vec<AirportRecord>> {
        self.load(
            &self.cache.airports,
            AIRPORTS_KEY,
            Dataset::Airports,
            parse_airports,
            fallback_airports,
        )
        .await
    }

    /// Active airlines, from cache when fresh, otherwise freshly fetched.
    pub async fn load_airlines(&self) -> Arc<Vec<AirlineRecord>> {
        self.load(
            &self.cache.airlines,
            AIRLINES_KEY,
            Dataset::Airlines,
            parse_airlines,
            fallback_airlines,
        )
        .await
    }

    /// Load both sets concurrently.
    pub async fn preload(&self) -> PreloadSummary {
        let (airports, airlines) = tokio::join!(self.load_airports(), self.load_airlines());
        PreloadSummary {
            airports: airports.len(),
            airlines: airlines.len(),
        }
    }

    async fn load<T: Send + Sync>(
        &self,
        store: &TtlCache<Arc<Vec<T>>>,
        key: &str,
        dataset: Dataset,
        parse: fn(&str) -> Vec<T>,
        fallback: fn() -> Vec<T>,
    ) -> Arc<Vec<T>> {
        if !store.is_expired(key).await
            && let Some(cached) = store.get(key).await
        {
            info!(key, count = cached.len(), "serving reference data from cache");
            return cached;
        }

        info!(key, "loading reference data from open-data source");

        let records = match self.fetch_records(dataset, parse).await {
            Ok(records) => {
                info!(key, count = records.len(), "reference data loaded and cached");
                records
            }
            Err(e) => {
                warn!(key, error = %e, "reference data unavailable, using fallback set");
                fallback()
            }
        };

        let records = Arc::new(records);
        store.set(key, records.clone()).await;
        records
    }

    async fn fetch_records<T>(
        &self,
        dataset: Dataset,
        parse: fn(&str) -> Vec<T>,
    ) -> Result<Vec<T>, ReferenceError> {
        let body = self.fetcher.fetch(dataset).await?;
        let text = std::str::from_utf8(&body)?;
        Ok(parse(text))
    }
}
