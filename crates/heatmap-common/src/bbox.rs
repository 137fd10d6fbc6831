//! Geographic bounding box type and operations.

use serde::{Deserialize, Serialize};

/// Quantization factor for cache keys: 1e-6 degrees (~0.1 m at the equator).
const QUANT_SCALE: f64 = 1e6;

/// A geographic bounding box in EPSG:4326 degrees.
///
/// `west < east` and `south < north` are caller preconditions for all
/// downstream computation; use [`BoundingBox::is_valid`] at input boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Create a new bounding box from edge coordinates.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Parse a query parameter string: "west,south,east,north".
    pub fn from_query_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))?;
        }

        Ok(Self {
            west: values[0],
            south: values[1],
            east: values[2],
            north: values[3],
        })
    }

    /// Width of the bounding box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Height of the bounding box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Latitude of the box midline, used for the flat-earth longitude scale.
    pub fn mid_lat(&self) -> f64 {
        (self.south + self.north) / 2.0
    }

    /// Check the `west < east`, `south < north` precondition.
    pub fn is_valid(&self) -> bool {
        self.west < self.east && self.south < self.north
    }

    /// Check if a point is contained within this bbox.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }

    /// Quantize the edges to integral micro-degrees for use in cache keys.
    ///
    /// Two boxes produced by independent float arithmetic that agree to
    /// within 1e-6 degrees map to the same key, replacing epsilon
    /// comparisons with plain equality.
    pub fn quantized(&self) -> [i64; 4] {
        [
            (self.west * QUANT_SCALE).round() as i64,
            (self.south * QUANT_SCALE).round() as i64,
            (self.east * QUANT_SCALE).round() as i64,
            (self.north * QUANT_SCALE).round() as i64,
        ]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bbox format: {0}. Expected 'west,south,east,north'")]
    InvalidFormat(String),

    #[error("Invalid number in bbox: {0}")]
    InvalidNumber(String),
}
