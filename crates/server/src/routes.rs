//! HTTP routes for the directors service.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{Method, Uri};
use axum::routing::get;
use axum::{Json, Router};
use catalog::PageSource;
use pipeline::{DirectorsEngine, EngineConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiRejection};
use crate::validation::{THRESHOLD_PARAM, parse_threshold};

pub const DIRECTORS_PATH: &str = "/api/directors";

/// Success body for `GET /api/directors`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorsResponse {
    pub directors: Vec<String>,
}

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn PageSource>,
    engine: DirectorsEngine,
}

impl AppState {
    /// The same source backs both the health gate and the engine.
    pub fn new(source: Arc<dyn PageSource>, engine_config: EngineConfig) -> Self {
        let engine = DirectorsEngine::new(source.clone(), engine_config);
        Self { source, engine }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(DIRECTORS_PATH, get(get_directors))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .with_state(state)
}

/// `GET /api/directors?threshold={n}`
///
/// Validates first, then gates on upstream health, then aggregates.
async fn get_directors(
    State(state): State<AppState>,
    uri: Uri,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<DirectorsResponse>, ApiRejection> {
    let path = uri.path();

    let Query(params) = query.map_err(|e| {
        debug!("Rejecting malformed query on {}: {}", path, e);
        ApiError::MalformedQuery.at(path)
    })?;

    let threshold = parse_threshold(params.get(THRESHOLD_PARAM).map(String::as_str))
        .map_err(|e| {
            debug!("Rejecting request on {}: {}", path, e);
            e.at(path)
        })?;

    if !state.source.is_healthy().await {
        warn!("Movies API is unhealthy, refusing threshold {}", threshold);
        return Err(ApiError::UpstreamUnavailable.at(path));
    }

    info!("Computing directors above threshold {}", threshold);
    let directors = state.engine.directors_above_threshold(threshold).await;

    Ok(Json(DirectorsResponse { directors }))
}

async fn not_found(uri: Uri) -> ApiRejection {
    ApiError::NotFound.at(uri.path())
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiRejection {
    debug!("Rejecting {} on {}", method, uri.path());
    ApiError::MethodNotAllowed.at(uri.path())
}
