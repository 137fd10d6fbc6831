//! Zoom-to-cell-size bucketing.

use serde::{Deserialize, Serialize};

/// Below this zoom level no grid is computed; the view is too coarse for a
/// city-scale heatmap to be meaningful.
pub const MIN_ZOOM: f64 = 7.0;

/// Discrete interpolation resolutions selected from zoom level.
///
/// Callers should recompute a grid only when the bucket changes, not on
/// every fractional zoom change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellSize {
    /// 0.5 km cells, zoom >= 12.
    Fine,
    /// 1 km cells, zoom >= 10.
    Medium,
    /// 2 km cells, zoom >= 8.
    Coarse,
    /// 4 km cells, zoom >= MIN_ZOOM.
    Coarsest,
}

impl CellSize {
    /// Bucket a continuous zoom level. `None` below [`MIN_ZOOM`].
    pub fn for_zoom(zoom: f64) -> Option<CellSize> {
        if zoom < MIN_ZOOM {
            return None;
        }
        Some(if zoom >= 12.0 {
            CellSize::Fine
        } else if zoom >= 10.0 {
            CellSize::Medium
        } else if zoom >= 8.0 {
            CellSize::Coarse
        } else {
            CellSize::Coarsest
        })
    }

    /// Cell edge length in kilometers.
    pub fn km(&self) -> f64 {
        match self {
            CellSize::Fine => 0.5,
            CellSize::Medium => 1.0,
            CellSize::Coarse => 2.0,
            CellSize::Coarsest => 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_buckets() {
        assert_eq!(CellSize::for_zoom(15.0), Some(CellSize::Fine));
        assert_eq!(CellSize::for_zoom(12.0), Some(CellSize::Fine));
        assert_eq!(CellSize::for_zoom(11.3), Some(CellSize::Medium));
        assert_eq!(CellSize::for_zoom(10.0), Some(CellSize::Medium));
        assert_eq!(CellSize::for_zoom(9.0), Some(CellSize::Coarse));
        assert_eq!(CellSize::for_zoom(7.5), Some(CellSize::Coarsest));
        assert_eq!(CellSize::for_zoom(7.0), Some(CellSize::Coarsest));
        assert_eq!(CellSize::for_zoom(6.99), None);
    }

    #[test]
    fn test_fractional_zoom_same_bucket() {
        // Memoization relies on fractional zoom changes within a bucket
        // producing equal values.
        assert_eq!(CellSize::for_zoom(10.1), CellSize::for_zoom(11.9));
    }
}
