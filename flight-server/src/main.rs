use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use flight_server::aviation::{AviationClient, CachedAviationClient, ProxyCacheConfig};
use flight_server::config::ServerConfig;
use flight_server::reference::{OpenFlightsClient, ReferenceCache, ReferenceLoader};
use flight_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flight_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env();

    // AviationStack proxy
    let aviation = AviationClient::new(config.aviation.clone())?;
    if !aviation.is_configured() {
        warn!("AVIATIONSTACK_API_KEY not set; flight endpoints will return 503");
    }
    let aviation = CachedAviationClient::new(aviation, &ProxyCacheConfig::default());

    // Open-data reference cache, shared by the loader and the search index
    let openflights = OpenFlightsClient::new(config.openflights.clone())?;
    let loader = ReferenceLoader::new(openflights, Arc::new(ReferenceCache::default()));

    if config.preload_on_startup {
        let loader = loader.clone();
        tokio::spawn(async move {
            let summary = loader.preload().await;
            info!(
                airports = summary.airports,
                airlines = summary.airlines,
                "reference cache preloaded"
            );
        });
    }

    info!(
        dir = %config.static_assets.dir,
        max_age_secs = config.static_assets.max_age_secs,
        "serving static assets"
    );
    let state = AppState::new(aviation, loader);
    let app = create_router(state, &config.static_assets);

    let addr = config.socket_addr();
    info!("Flight data server listening on http://{addr}");
    info!("  GET /api/flights, /api/airports, /api/airlines, /api/routes, /api/aircraft");
    info!("  GET /api/autocomplete/airports?q=, /api/autocomplete/airlines?q=");
    info!("  GET /api/cache/preload");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
