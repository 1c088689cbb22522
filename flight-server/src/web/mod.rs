//! Web layer for the flight data aggregator.
//!
//! Provides the JSON API consumed by the browser front-end: AviationStack
//! pass-through endpoints plus autocomplete over cached open data.

mod dto;
mod routes;
mod state;


pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
