//! Memoization key for computed grids.

use crate::zoom::CellSize;
use heatmap_common::BoundingBox;

/// Cache key for a computed grid.
///
/// A grid is fully determined by the station set, the bounding box, and the
/// cell-size bucket, so caching on this key lets unrelated state changes
/// (hover, animation frames) reuse the last grid. The bbox is quantized to
/// micro-degrees so the key compares by plain equality instead of the
/// float-epsilon comparison the viewport layer would otherwise need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridKey {
    /// Monotonic counter bumped whenever the station set is refreshed.
    pub station_version: u64,
    /// Bbox edges quantized to 1e-6 degrees: [west, south, east, north].
    pub bbox: [i64; 4],
    pub cell_size: CellSize,
}

impl GridKey {
    pub fn new(station_version: u64, bbox: BoundingBox, cell_size: CellSize) -> Self {
        Self {
            station_version,
            bbox: bbox.quantized(),
            cell_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_equality_under_float_noise() {
        let a = GridKey::new(
            3,
            BoundingBox::new(-122.45, 37.75, -122.41, 37.79),
            CellSize::Medium,
        );
        let b = GridKey::new(
            3,
            BoundingBox::new(-122.45 + 1e-9, 37.75, -122.41, 37.79 - 1e-9),
            CellSize::Medium,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_distinguishes_inputs() {
        let bbox = BoundingBox::new(-122.45, 37.75, -122.41, 37.79);
        let base = GridKey::new(3, bbox, CellSize::Medium);

        assert_ne!(base, GridKey::new(4, bbox, CellSize::Medium));
        assert_ne!(base, GridKey::new(3, bbox, CellSize::Fine));
        assert_ne!(
            base,
            GridKey::new(3, BoundingBox::new(-122.46, 37.75, -122.41, 37.79), CellSize::Medium)
        );
    }
}
