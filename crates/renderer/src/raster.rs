//! Grid-to-RGBA rasterization.

use crate::scale::ColorScale;
use heatmap_common::Metric;
use interpolator::{Cell, Grid};
use rayon::prelude::*;

/// Rasterize a grid into an RGBA buffer, one pixel per cell.
///
/// Grid row 0 is the southernmost row; image row 0 is the top of the image,
/// so rows are flipped on the way out. Cells with `alpha == 0` become fully
/// transparent pixels. Rows are independent, so the fan-out runs per-row in
/// parallel.
///
/// The returned buffer is `grid.cols * grid.rows * 4` bytes; display layers
/// scale it up with bilinear smoothing to get gradient output without
/// visible cell edges.
pub fn rasterize(grid: &Grid, metric: Metric, scale: &ColorScale) -> Vec<u8> {
    let cols = grid.cols;
    let mut pixels = vec![0u8; cols * grid.rows * 4];

    pixels
        .par_chunks_exact_mut(cols * 4)
        .enumerate()
        .for_each(|(img_row, out)| {
            // Flip: image top row comes from the northernmost grid row.
            let grid_row = grid.rows - 1 - img_row;
            let cells = &grid.cells[grid_row * cols..(grid_row + 1) * cols];
            for (cell, px) in cells.iter().zip(out.chunks_exact_mut(4)) {
                write_pixel(cell, metric, scale, px);
            }
        });

    pixels
}

fn write_pixel(cell: &Cell, metric: Metric, scale: &ColorScale, px: &mut [u8]) {
    if cell.alpha <= 0.0 {
        // Values are unspecified for uncovered cells; leave transparent black.
        return;
    }

    let value = match metric {
        Metric::Temperature => cell.temperature,
        Metric::Humidity => cell.humidity,
        Metric::WindSpeedMph => cell.wind_speed_mph,
    };
    let color = scale.color_at(value);

    px[0] = color.r;
    px[1] = color.g;
    px[2] = color.b;
    px[3] = (cell.alpha * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use heatmap_common::{BoundingBox, Station};
    use interpolator::interpolate;

    fn grid_with_one_station() -> Grid {
        let station = Station {
            id: "a".to_string(),
            lat: 37.77,
            lon: -122.43,
            temp_f: 60.0,
            humidity: 70.0,
            wind_speed_mph: 8.0,
            last_update_time: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        };
        interpolate(
            &[station],
            BoundingBox::new(-122.45, 37.75, -122.41, 37.79),
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_buffer_shape() {
        let grid = grid_with_one_station();
        let scale = ColorScale::for_metric(Metric::Temperature);
        let pixels = rasterize(&grid, Metric::Temperature, &scale);
        assert_eq!(pixels.len(), grid.cols * grid.rows * 4);
    }

    #[test]
    fn test_row_flip_places_south_at_bottom() {
        let grid = grid_with_one_station();
        let scale = ColorScale::for_metric(Metric::Temperature);
        let pixels = rasterize(&grid, Metric::Temperature, &scale);

        // South/west grid cell must land in the bottom image row.
        let south_west = grid.cell(0, 0);
        let expected = scale.color_at(south_west.temperature);
        let bottom_row_start = (grid.rows - 1) * grid.cols * 4;
        assert_eq!(pixels[bottom_row_start], expected.r);
        assert_eq!(pixels[bottom_row_start + 1], expected.g);
        assert_eq!(pixels[bottom_row_start + 2], expected.b);
        assert_eq!(
            pixels[bottom_row_start + 3],
            (south_west.alpha * 255.0).round() as u8
        );
    }

    #[test]
    fn test_uncovered_cell_is_transparent() {
        let cell = Cell {
            temperature: 0.0,
            humidity: 0.0,
            wind_speed_mph: 0.0,
            alpha: 0.0,
        };
        let scale = ColorScale::for_metric(Metric::Temperature);
        let mut px = [0u8; 4];
        write_pixel(&cell, Metric::Temperature, &scale, &mut px);
        assert_eq!(px, [0, 0, 0, 0]);
    }
}
