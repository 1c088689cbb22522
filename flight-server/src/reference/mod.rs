//! Open-data reference records (airports, airlines) for autocomplete.
//!
//! The OpenFlights bulk files are fetched on demand, parsed, and held in an
//! in-memory cache for 24 hours. When the source is unreachable a small
//! built-in set is served instead, so autocomplete always has something to
//! search.

mod cache;
mod client;
mod error;
mod fallback;
mod loader;
mod parse;
mod record;
mod search;

pub use cache::{
    AIRLINES_KEY, AIRPORTS_KEY, CacheEntry, ReferenceCache, ReferenceCacheConfig, TtlCache,
};
pub use client::{Dataset, OpenFlightsClient, OpenFlightsConfig, TextFetcher};
pub use error::ReferenceError;
pub use fallback::{fallback_airlines, fallback_airports};
pub use loader::{PreloadSummary, ReferenceLoader};
pub use parse::{
    LineRejection, NULL_SENTINEL, parse_airline_line, parse_airlines, parse_airport_line,
    parse_airports, split_fields,
};
pub use record::{AirlineRecord, AirportRecord};
pub use search::{DEFAULT_LIMIT, SearchIndex, Searchable, filter_matches};

#[cfg(test)]
pub(crate) use loader::testing;
