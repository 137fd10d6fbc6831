//! Inverse-distance-weighted grid interpolation with coverage fade.

use heatmap_common::{BoundingBox, Station};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Kilometers per degree of latitude (flat-earth approximation).
///
/// Longitude degrees scale by cos(mid-latitude). Valid for city-scale boxes
/// (error < 0.3% at mid-latitudes); the fade distances below are calibrated
/// against this conversion, so it must not be swapped for a geodesic one.
const KM_PER_DEG_LAT: f64 = 111.32;

/// Squared-distance threshold (km²) below which a station is an exact hit
/// for a cell center (~1 meter).
const EXACT_HIT_D2_KM: f64 = 1e-6;

/// Distance band over which cell alpha fades from 1 to 0.
const FADE_START_KM: f64 = 10.0;
const FADE_END_KM: f64 = 20.0;

/// Hard cap on cells per grid. Bounds worst-case work per viewport update
/// (O(cols * rows * stations)); checked before any cell is allocated.
pub const MAX_CELLS: usize = 20_000;

/// One interpolated grid cell.
///
/// When `alpha == 0.0` the metric fields are zeroed and carry no meaning;
/// renderers must skip drawing such cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed_mph: f64,
    /// Coverage confidence in [0, 1], derived from distance to the nearest
    /// station.
    pub alpha: f64,
}

/// A row-major grid of interpolated cells.
///
/// Row 0 is the southernmost row, column 0 the westernmost column. The
/// covered box may extend past the requested east/north edge because the
/// cell count is snapped outward to whole cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
    /// `cols * rows` cells, row-major from the southwest corner.
    pub cells: Vec<Cell>,
}

impl Grid {
    /// Cell at (row, col), row 0 = south.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.cols + col]
    }

    /// Geographic center of cell (row, col).
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        let d_lon = (self.east - self.west) / self.cols as f64;
        let d_lat = (self.north - self.south) / self.rows as f64;
        (
            self.south + d_lat * (row as f64 + 0.5),
            self.west + d_lon * (col as f64 + 0.5),
        )
    }
}

/// Count cell centers along one axis: start at `origin + step/2`, advance by
/// `step` while still `< limit`. Capped so a degenerate step cannot spin.
fn axis_steps(origin: f64, limit: f64, step: f64) -> usize {
    let mut n = 0usize;
    let mut x = origin + step / 2.0;
    while x < limit {
        n += 1;
        if n > MAX_CELLS {
            break;
        }
        x += step;
    }
    n
}

/// Interpolate station observations onto a regular grid covering `bbox`.
///
/// Returns `None` when there is nothing to render: no stations, or the
/// requested resolution would exceed [`MAX_CELLS`]. Never panics for valid
/// inputs; a malformed bbox is a caller bug.
///
/// Estimation is inverse-distance weighting (power 2) in planar km space.
/// A station within ~1 m of a cell center short-circuits the weighting and
/// the cell inherits its raw values; the first such station in iteration
/// order wins. Each cell also gets an alpha fading from 1 at 10 km from the
/// nearest station to 0 at 20 km, so the rendered heatmap hugs actual
/// station coverage instead of filling the whole rectangle.
pub fn interpolate(stations: &[Station], bbox: BoundingBox, cell_size_km: f64) -> Option<Grid> {
    debug_assert!(bbox.is_valid(), "malformed bbox: {:?}", bbox);
    debug_assert!(cell_size_km > 0.0);

    if stations.is_empty() {
        return None;
    }

    let km_per_deg_lon = KM_PER_DEG_LAT * bbox.mid_lat().to_radians().cos();
    let d_lat = cell_size_km / KM_PER_DEG_LAT;
    let d_lon = cell_size_km / km_per_deg_lon;

    let cols = axis_steps(bbox.west, bbox.east, d_lon);
    let rows = axis_steps(bbox.south, bbox.north, d_lat);

    if cols == 0 || rows == 0 {
        return None;
    }
    if cols.saturating_mul(rows) > MAX_CELLS {
        debug!(
            cols,
            rows,
            cell_size_km,
            "grid exceeds cell budget, skipping interpolation"
        );
        return None;
    }

    let mut cells = Vec::with_capacity(cols * rows);

    for row in 0..rows {
        let lat = bbox.south + d_lat * (row as f64 + 0.5);
        for col in 0..cols {
            let lon = bbox.west + d_lon * (col as f64 + 0.5);
            cells.push(interpolate_cell(stations, lat, lon, km_per_deg_lon));
        }
    }

    Some(Grid {
        cols,
        rows,
        west: bbox.west,
        south: bbox.south,
        east: bbox.west + cols as f64 * d_lon,
        north: bbox.south + rows as f64 * d_lat,
        cells,
    })
}

fn interpolate_cell(stations: &[Station], lat: f64, lon: f64, km_per_deg_lon: f64) -> Cell {
    let mut weight_sum = 0.0;
    let mut temp_sum = 0.0;
    let mut humidity_sum = 0.0;
    let mut wind_sum = 0.0;
    let mut min_d2 = f64::INFINITY;
    let mut exact: Option<&Station> = None;

    for station in stations {
        let dx = (station.lon - lon) * km_per_deg_lon;
        let dy = (station.lat - lat) * KM_PER_DEG_LAT;
        let d2 = dx * dx + dy * dy;

        if d2 < min_d2 {
            min_d2 = d2;
        }

        if d2 < EXACT_HIT_D2_KM {
            // First station within ~1 m wins outright.
            exact = Some(station);
            min_d2 = 0.0;
            break;
        }

        // IDW, power 2: weight falls off with squared distance.
        let weight = 1.0 / d2;
        weight_sum += weight;
        temp_sum += weight * station.temp_f;
        humidity_sum += weight * station.humidity;
        wind_sum += weight * station.wind_speed_mph;
    }

    let dist_km = min_d2.sqrt();
    let alpha = if dist_km <= FADE_START_KM {
        1.0
    } else if dist_km >= FADE_END_KM {
        0.0
    } else {
        1.0 - (dist_km - FADE_START_KM) / (FADE_END_KM - FADE_START_KM)
    };

    if let Some(station) = exact {
        return Cell {
            temperature: station.temp_f,
            humidity: station.humidity,
            wind_speed_mph: station.wind_speed_mph,
            alpha,
        };
    }

    if alpha == 0.0 {
        // Renderer skips the cell; don't bother finishing the estimate.
        return Cell {
            temperature: 0.0,
            humidity: 0.0,
            wind_speed_mph: 0.0,
            alpha: 0.0,
        };
    }

    Cell {
        temperature: temp_sum / weight_sum,
        humidity: humidity_sum / weight_sum,
        wind_speed_mph: wind_sum / weight_sum,
        alpha,
    }
}
