//! Application state for the web layer.

use std::sync::Arc;
use std::time::Instant;

use crate::aviation::CachedAviationClient;
use crate::reference::{ReferenceLoader, SearchIndex};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached AviationStack client
    pub aviation: Arc<CachedAviationClient>,

    /// Loader for open-data reference records
    pub loader: ReferenceLoader,

    /// Autocomplete search over the loader's cache
    pub search: SearchIndex,

    /// When the process started serving
    pub started_at: Instant,
}

impl AppState {
    /// Create a new app state. The search index reads the loader's cache.
    pub fn new(aviation: CachedAviationClient, loader: ReferenceLoader) -> Self {
        let search = SearchIndex::new(loader.cache().clone());
        Self {
            aviation: Arc::new(aviation),
            loader,
            search,
            started_at: Instant::now(),
        }
    }
}
