//! In-memory TTL store for reference record sets.
//!
//! Expiry is pull-based: `get` ignores age entirely and callers ask
//! `is_expired` before deciding to refresh. Expired entries stay readable
//! until they are overwritten.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use super::record::{AirlineRecord, AirportRecord};

/// Default TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Cache key for the airport set.
pub const AIRPORTS_KEY: &str = "airports";

/// Cache key for the airline set.
pub const AIRLINES_KEY: &str = "airlines";

/// A stored payload and the moment it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub data: V,
    pub fetched_at: DateTime<Utc>,
}

/// Configuration for the reference cache.
#[derive(Debug, Clone)]
pub struct ReferenceCacheConfig {
    /// How long an entry counts as fresh.
    pub ttl: Duration,
}

impl ReferenceCacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for ReferenceCacheConfig {
    fn default() -> Self {
        Self { ttl: DEFAULT_TTL }
    }
}

/// Keyed store of `(payload, fetched_at)` pairs with a fixed TTL.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    ttl: TimeDelta,
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty store with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    /// True when there is no entry for `key`, or it is older than the TTL.
    pub async fn is_expired(&self, key: &str) -> bool {
        self.is_expired_at(key, Utc::now()).await
    }

    /// `is_expired` evaluated against an explicit clock reading.
    pub async fn is_expired_at(&self, key: &str, now: DateTime<Utc>) -> bool {
        let guard = self.entries.read().await;
        match guard.get(key) {
            Some(entry) => now - entry.fetched_at > self.ttl,
            None => true,
        }
    }

    /// Replace the entry for `key`, stamping it with the current time.
    pub async fn set(&self, key: &str, data: V) {
        self.set_at(key, data, Utc::now()).await;
    }

    /// Replace the entry for `key` with an explicit fetch time.
    pub async fn set_at(&self, key: &str, data: V, fetched_at: DateTime<Utc>) {
        let mut guard = self.entries.write().await;
        guard.insert(key.to_string(), CacheEntry { data, fetched_at });
    }

    /// Stored payload for `key`, regardless of age.
    pub async fn get(&self, key: &str) -> Option<V> {
        let guard = self.entries.read().await;
        guard.get(key).map(|entry| entry.data.clone())
    }

    /// When the entry for `key` was last written.
    pub async fn fetched_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let guard = self.entries.read().await;
        guard.get(key).map(|entry| entry.fetched_at)
    }

    /// The TTL this store applies.
    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }
}

/// Shared reference data owned by the application for its whole lifetime.
///
/// The loader writes it; the search index only reads it.
#[derive(Debug)]
pub struct ReferenceCache {
    pub airports: TtlCache<Arc<Vec<AirportRecord>>>,
    pub airlines: TtlCache<Arc<Vec<AirlineRecord>>>,
}

impl ReferenceCache {
    /// Create an empty cache.
    pub fn new(config: &ReferenceCacheConfig) -> Self {
        Self {
            airports: TtlCache::new(config.ttl),
            airlines: TtlCache::new(config.ttl),
        }
    }
}

impl Default for ReferenceCache {
    fn default() -> Self {
        Self::new(&ReferenceCacheConfig::default())
    }
}
