//! Flight data aggregator server.
//!
//! Fronts the rate-limited AviationStack API and the OpenFlights open-data
//! files behind one JSON API, with cached autocomplete search over airports
//! and airlines.

pub mod aviation;
pub mod config;
pub mod reference;
pub mod web;

#[cfg(test)]
mod test_support;
