//! HTTP request handlers.

use axum::{
    extract::{Extension, Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use heatmap_common::{BoundingBox, HeatmapError, Metric, Station};
use interpolator::CellSize;
use metrics::counter;
use renderer::{legend, png, rasterize, ColorScale};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, instrument};

use crate::state::AppState;

/// Default query point: San Francisco.
const DEFAULT_LAT: f64 = 37.773;
const DEFAULT_LON: f64 = -122.431;

fn error_response(err: HeatmapError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "request failed");
    }
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

fn png_response(pixels: &[u8], width: usize, height: usize) -> Response {
    match png::encode_rgba(pixels, width, height) {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/png")],
            bytes,
        )
            .into_response(),
        Err(e) => error_response(HeatmapError::RenderError(e.to_string())),
    }
}

// ============================================================================
// Stations
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StationsParams {
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<Station>,
    pub fetched_at: String,
}

#[instrument(skip(state))]
pub async fn stations_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<StationsParams>,
) -> Response {
    counter!("stations_requests_total").increment(1);

    let lat = params.lat.unwrap_or(DEFAULT_LAT);
    let lon = params.lon.unwrap_or(DEFAULT_LON);

    match state.stations(lat, lon).await {
        Ok(snapshot) => Json(StationsResponse {
            stations: snapshot.stations.as_ref().clone(),
            fetched_at: Utc::now().to_rfc3339(),
        })
        .into_response(),
        Err(e) => error_response(HeatmapError::ProviderError(e.to_string())),
    }
}

// ============================================================================
// Heatmap
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct HeatmapParams {
    /// "west,south,east,north" in degrees.
    bbox: String,
    /// Map zoom level; buckets to a cell size.
    zoom: f64,
}

#[instrument(skip(state))]
pub async fn heatmap_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(metric): Path<String>,
    Query(params): Query<HeatmapParams>,
) -> Response {
    counter!("heatmap_requests_total").increment(1);

    let metric: Metric = match metric.parse() {
        Ok(m) => m,
        Err(e) => return error_response(e.into()),
    };

    let bbox = match BoundingBox::from_query_string(&params.bbox) {
        Ok(b) => b,
        Err(e) => return error_response(e.into()),
    };
    if !bbox.is_valid() {
        return error_response(HeatmapError::InvalidBbox(format!(
            "west must be < east and south < north, got {}",
            params.bbox
        )));
    }

    // Below the minimum zoom there is nothing meaningful to draw.
    let cell_size = match CellSize::for_zoom(params.zoom) {
        Some(size) => size,
        None => return StatusCode::NO_CONTENT.into_response(),
    };

    let snapshot = match state.stations(bbox.mid_lat(), (bbox.west + bbox.east) / 2.0).await {
        Ok(s) => s,
        Err(e) => return error_response(HeatmapError::ProviderError(e.to_string())),
    };

    // "No grid" (no stations, or cell budget exceeded) renders as nothing.
    let grid = match state.grid(&snapshot, bbox, cell_size).await {
        Some(g) => g,
        None => return StatusCode::NO_CONTENT.into_response(),
    };

    let scale = ColorScale::for_metric(metric);
    let pixels = rasterize(&grid, metric, &scale);
    png_response(&pixels, grid.cols, grid.rows)
}

// ============================================================================
// Legend
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LegendParams {
    width: Option<usize>,
    height: Option<usize>,
}

#[instrument]
pub async fn legend_handler(
    Path(metric): Path<String>,
    Query(params): Query<LegendParams>,
) -> Response {
    let metric: Metric = match metric.parse() {
        Ok(m) => m,
        Err(e) => return error_response(e.into()),
    };

    let width = params.width.unwrap_or(240).min(2048);
    let height = params.height.unwrap_or(16).min(256);
    if width == 0 || height == 0 {
        return error_response(HeatmapError::InvalidParameter {
            param: "width/height".to_string(),
            message: "must be positive".to_string(),
        });
    }

    let scale = ColorScale::for_metric(metric);
    let pixels = legend::render_strip(&scale, width, height);
    png_response(&pixels, width, height)
}

// ============================================================================
// Health
// ============================================================================

pub async fn health_handler() -> Response {
    (StatusCode::OK, "OK").into_response()
}
