//! Autocomplete search over cached reference records.
//!
//! Search never loads anything. It reads whatever the cache currently holds,
//! expired or not, and an absent entry simply yields no results.

use std::sync::Arc;

use super::cache::{AIRLINES_KEY, AIRPORTS_KEY, ReferenceCache};
use super::record::{AirlineRecord, AirportRecord};

/// Default number of results returned by autocomplete.
pub const DEFAULT_LIMIT: usize = 10;

/// A record that can be matched by case-insensitive substring search.
pub trait Searchable {
    /// Fields the query is matched against. Absent fields never match.
    fn search_fields(&self) -> impl Iterator<Item = &str>;

    /// True if any search field contains `needle`, which must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for AirportRecord {
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.airport_name.as_str()),
            Some(self.city_name.as_str()),
            Some(self.iata_code.as_str()),
            self.icao_code.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

impl Searchable for AirlineRecord {
    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.airline_name.as_str()),
            Some(self.iata_code.as_str()),
            self.icao_code.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Stable filter: the first `limit` records matching `query`, in input order.
///
/// An empty query matches everything.
pub fn filter_matches<T: Searchable + Clone>(records: &[T], query: &str, limit: usize) -> Vec<T> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| r.matches(&needle))
        .take(limit)
        .cloned()
        .collect()
}

/// Read-only search view over the shared reference cache.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    cache: Arc<ReferenceCache>,
}

impl SearchIndex {
    /// Create a search index reading from `cache`.
    pub fn new(cache: Arc<ReferenceCache>) -> Self {
        Self { cache }
    }

    /// Airports whose name, city, IATA or ICAO code contains `query`.
    pub async fn search_airports(&self, query: &str, limit: usize) -> Vec<AirportRecord> {
        match self.cache.airports.get(AIRPORTS_KEY).await {
            Some(airports) => filter_matches(&airports, query, limit),
            None => Vec::new(),
        }
    }

    /// Airlines whose name, IATA or ICAO code contains `query`.
    pub async fn search_airlines(&self, query: &str, limit: usize) -> Vec<AirlineRecord> {
        match self.cache.airlines.get(AIRLINES_KEY).await {
            Some(airlines) => filter_matches(&airlines, query, limit),
            None => Vec::new(),
        }
    }
}
