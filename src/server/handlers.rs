//! Endpoint handlers.
//!
//! Handlers are thin: parse parameters, call the service, serialize.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::AppState;
use crate::AstraError;
use crate::types::{Limit, PlanetRecord, RawPayload, ScoredPlanet};

type ApiResult<T> = std::result::Result<Json<T>, AstraError>;

/// Range is checked after extraction so an out-of-range limit is a 422.
#[derive(Debug, Deserialize)]
pub(super) struct LimitQuery {
    limit: Option<u32>,
}

impl LimitQuery {
    fn limit(&self) -> Result<Limit, AstraError> {
        self.limit.map_or(Ok(Limit::DEFAULT), Limit::new)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    q: String,
}

pub(super) async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub(super) async fn suggestions(State(state): State<AppState>) -> ApiResult<Vec<PlanetRecord>> {
    Ok(Json(state.service.suggestions().await?))
}

pub(super) async fn exoplanets(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Vec<ScoredPlanet>> {
    let limit = query.limit()?;
    Ok(Json(state.service.exoplanets(limit).await?))
}

pub(super) async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<ScoredPlanet>> {
    Ok(Json(state.service.search(&query.q).await?))
}

pub(super) async fn raw(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<RawPayload> {
    let limit = query.limit()?;
    Ok(Json(state.service.raw(limit).await?))
}

pub(super) async fn object(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<ScoredPlanet> {
    Ok(Json(state.service.object(&name).await?))
}

impl IntoResponse for AstraError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %self, "request failed");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
