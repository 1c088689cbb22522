//! AviationStack proxy client.
//!
//! Live flights, airports, airlines, routes and aircraft come from the
//! third-party AviationStack API. Responses are passed through as opaque
//! JSON; this crate only adds the access key, bounds concurrency and caches
//! identical requests briefly.

mod cache;
mod client;
mod error;

pub use cache::{CachedAviationClient, ProxyCacheConfig};
pub use client::{AviationClient, AviationConfig, Endpoint, Params};
pub use error::AviationError;
