use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use satlink_common::{ElementRecord, EntityInfo, ServiceStats};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::config::BackendConfig;
use crate::error::ApiError;
use crate::module::info::{InfoResolver, WikipediaClient};
use crate::module::tle::{CatalogProvider, CelestrakClient, locate_record};
use crate::module::upstream::HttpUpstream;

/// Shared, read-only handles used by every request
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<dyn CatalogProvider>,
    resolver: Arc<InfoResolver>,
    started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogProvider>, resolver: Arc<InfoResolver>) -> Self {
        Self {
            catalog,
            resolver,
            started_at: Utc::now(),
        }
    }

    /// Wire the HTTP-backed providers described by `config`
    pub fn from_config(config: &BackendConfig) -> anyhow::Result<Self> {
        let upstream = HttpUpstream::new(&config.user_agent)?;

        let catalog = CelestrakClient::new(upstream.clone(), config.tle.clone());
        let encyclopedia = WikipediaClient::new(upstream, config.info.clone());
        let resolver = InfoResolver::new(Arc::new(encyclopedia), config.info.google_search_url.clone());

        Ok(Self::new(Arc::new(catalog), Arc::new(resolver)))
    }
}

/// Query string as ordered key/value pairs. Repeated keys are kept, so
/// extraction never rejects a well-formed request.
#[derive(Debug, Default)]
pub struct NameQuery {
    params: Vec<(String, String)>,
}

impl NameQuery {
    pub fn new(params: Vec<(String, String)>) -> Self {
        Self { params }
    }

    /// First `name` value, trimmed. Absent or blank values are rejected.
    fn required_name(&self) -> Result<&str, ApiError> {
        self.params
            .iter()
            .find(|(key, _)| key == "name")
            .map(|(_, value)| value.trim())
            .filter(|name| !name.is_empty())
            .ok_or(ApiError::MissingParam("name"))
    }
}

/// Build the HTTP application: API routes, request tracing and optional CORS.
pub fn router(state: AppState, enable_cors: bool) -> Router {
    let app = Router::new()
        .route("/api/tle", get(tle_by_name))
        .route("/api/active", get(active_catalog))
        .route("/api/info", get(entity_info))
        .route("/health", get(health_check))
        .route("/stats", get(stats))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}

/// First TLE for a named object
#[instrument(skip_all, fields(request_id = %uuid::Uuid::now_v7()))]
async fn tle_by_name(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ElementRecord>, ApiError> {
    let query = NameQuery::new(params);
    let name = query.required_name()?;
    info!("TLE lookup for '{}'", name);

    let body = state.catalog.fetch_by_name(name).await?;
    let text = body.trim();
    if text.is_empty() {
        return Err(ApiError::NotFound);
    }

    let record = locate_record(text, name)?;
    info!("Found TLE '{}' for query '{}'", record.name, name);
    Ok(Json(record))
}

/// Whole active catalog as plain text
#[instrument(skip_all, fields(request_id = %uuid::Uuid::now_v7()))]
async fn active_catalog(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state.catalog.fetch_active().await?;
    info!("Serving active catalog ({} bytes)", body.len());
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}

/// Description and links for a free-text name. Upstream failures only degrade the result.
#[instrument(skip_all, fields(request_id = %uuid::Uuid::now_v7()))]
async fn entity_info(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<EntityInfo>, ApiError> {
    let query = NameQuery::new(params);
    let name = query.required_name()?;
    let info = state.resolver.resolve(name).await;
    info!("Info for '{}' (resolved: {})", name, info.is_resolved());
    Ok(Json(info))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn stats(State(state): State<AppState>) -> Json<ServiceStats> {
    Json(ServiceStats {
        status: "running".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at,
    })
}
