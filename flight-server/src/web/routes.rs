//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde_json::Value;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeader;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::aviation::{AviationError, Params};
use crate::config::StaticConfig;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// Anything not matched by an API route is served from `static_assets.dir`
/// with its `Cache-Control` max-age. Responses are gzipped when the client
/// accepts it.
pub fn create_router(state: AppState, static_assets: &StaticConfig) -> Router {
    let cache_control = HeaderValue::from_str(&static_assets.cache_control())
        .unwrap_or(HeaderValue::from_static("no-cache"));
    let assets = SetResponseHeader::overriding(
        ServeDir::new(&static_assets.dir),
        header::CACHE_CONTROL,
        cache_control,
    );

    Router::new()
        .route("/health", get(health))
        .route("/api/flights", get(flights))
        .route("/api/flights/airline/:code", get(flights_by_airline))
        .route(
            "/api/flights/route/:departure/:arrival",
            get(flights_by_route),
        )
        .route("/api/airports", get(airports))
        .route("/api/airports/:code", get(airport_by_code))
        .route("/api/airlines", get(airlines))
        .route("/api/routes", get(routes))
        .route("/api/aircraft", get(aircraft))
        .route("/api/autocomplete/airports", get(autocomplete_airports))
        .route("/api/autocomplete/airlines", get(autocomplete_airlines))
        .route("/api/cache/preload", get(preload_cache))
        .fallback_service(assets)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

async fn flights(
    State(state): State<AppState>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, AppError> {
    let body = state.aviation.flights(params).await?;
    Ok(Json(body.as_ref().clone()))
}

async fn flights_by_airline(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(req): Query<LimitRequest>,
) -> Result<Json<Value>, AppError> {
    let body = state.aviation.flights_by_airline(&code, req.limit()).await?;
    Ok(Json(body.as_ref().clone()))
}

async fn flights_by_route(
    State(state): State<AppState>,
    Path((departure, arrival)): Path<(String, String)>,
    Query(req): Query<LimitRequest>,
) -> Result<Json<Value>, AppError> {
    let body = state
        .aviation
        .flights_by_route(&departure, &arrival, req.limit())
        .await?;
    Ok(Json(body.as_ref().clone()))
}

async fn airports(
    State(state): State<AppState>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, AppError> {
    let body = state.aviation.airports(params).await?;
    Ok(Json(body.as_ref().clone()))
}

async fn airport_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, AppError> {
    let body = state.aviation.airport_by_code(&code).await?;
    Ok(Json(body.as_ref().clone()))
}

async fn airlines(
    State(state): State<AppState>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, AppError> {
    let body = state.aviation.airlines(params).await?;
    Ok(Json(body.as_ref().clone()))
}

async fn routes(
    State(state): State<AppState>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, AppError> {
    let body = state.aviation.routes(params).await?;
    Ok(Json(body.as_ref().clone()))
}

async fn aircraft(
    State(state): State<AppState>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, AppError> {
    let body = state.aviation.aircraft(params).await?;
    Ok(Json(body.as_ref().clone()))
}

/// Airport autocomplete.
///
/// Makes sure the reference cache is populated before searching it.
async fn autocomplete_airports(
    State(state): State<AppState>,
    Query(req): Query<AutocompleteRequest>,
) -> Response {
    if req.q.is_empty() {
        return Json(QueryTooShortResponse::default()).into_response();
    }

    state.loader.load_airports().await;
    let results = state.search.search_airports(&req.q, req.limit()).await;

    Json(AutocompleteResponse::new(results, req.q)).into_response()
}

/// Airline autocomplete.
async fn autocomplete_airlines(
    State(state): State<AppState>,
    Query(req): Query<AutocompleteRequest>,
) -> Response {
    if req.q.is_empty() {
        return Json(QueryTooShortResponse::default()).into_response();
    }

    state.loader.load_airlines().await;
    let results = state.search.search_airlines(&req.q, req.limit()).await;

    Json(AutocompleteResponse::new(results, req.q)).into_response()
}

/// Load both reference sets now rather than on first search.
async fn preload_cache(State(state): State<AppState>) -> Json<PreloadResponse> {
    let summary = state.loader.preload().await;

    Json(PreloadResponse {
        message: "Cache preloaded",
        airports_count: summary.airports,
        airlines_count: summary.airlines,
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Upstream { message: String },
    RateLimited { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<AviationError> for AppError {
    fn from(e: AviationError) -> Self {
        let message = e.to_string();
        match e {
            AviationError::NotConfigured(_) => AppError::Unavailable { message },
            AviationError::RateLimited => AppError::RateLimited { message },
            AviationError::Api { .. }
            | AviationError::FunctionRestricted(_)
            | AviationError::Unauthorized => AppError::Upstream { message },
            AviationError::Http(_) | AviationError::Json { .. } => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::RateLimited { message } => (StatusCode::TOO_MANY_REQUESTS, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
