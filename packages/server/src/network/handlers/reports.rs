//! Report endpoint handlers.
//!
//! Each handler parses the query string into a filter map, calls the
//! matching report function, and wraps the result in a `{"data": ...}`
//! envelope. Report errors become HTTP 400 with a `{"detail": ...}` body:
//! both a bad configured identifier and a rejected query are reported to
//! the caller as request failures with a description.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::report;
use crate::report::ReportError;

use super::AppState;

/// Wrapper turning a [`ReportError`] into a 400 response.
#[derive(Debug)]
pub struct ApiError(ReportError);

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}

fn envelope<T: Serialize>(data: &T) -> Json<serde_json::Value> {
    Json(json!({ "data": data }))
}

/// `GET /dimensions` — filtered raw records.
pub async fn dimensions_handler(
    State(state): State<AppState>,
    Query(filters): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let records = report::fetch_dimensions(state.db.as_ref(), &state.config, &filters).await?;
    Ok(envelope(&records))
}

/// `GET /zones` — per-zone aggregates over the filtered records.
pub async fn zones_handler(
    State(state): State<AppState>,
    Query(filters): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let records = report::fetch_dimensions(state.db.as_ref(), &state.config, &filters).await?;
    Ok(envelope(&report::summarize_by_zone(&records)))
}

/// `GET /districts` — per-district aggregates over the filtered records.
pub async fn districts_handler(
    State(state): State<AppState>,
    Query(filters): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let records = report::fetch_dimensions(state.db.as_ref(), &state.config, &filters).await?;
    Ok(envelope(&report::summarize_by_district(&records)))
}

/// `GET /district-polygons` — boundary polygons; accepts no filters.
pub async fn district_polygons_handler(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let polygons = report::fetch_district_polygons(state.db.as_ref(), &state.config).await?;
    Ok(envelope(&polygons))
}

/// `GET /heatmap` — filtered raw points.
pub async fn heatmap_handler(
    State(state): State<AppState>,
    Query(filters): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let points = report::fetch_heatmap(state.db.as_ref(), &state.config, &filters).await?;
    Ok(envelope(&points))
}

/// `GET /filters` — option lists for the six lookup categories.
/// Infallible: failing categories degrade to empty lists.
pub async fn filter_options_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let sets = report::fetch_filter_options(state.db.as_ref()).await;
    envelope(&sets)
}
