//! End-to-end interpolation scenarios over realistic San Francisco inputs.

use chrono::{TimeZone, Utc};
use heatmap_common::{BoundingBox, Station};
use interpolator::{interpolate, CellSize, GridKey, MAX_CELLS};

fn station(id: &str, lat: f64, lon: f64, temp_f: f64) -> Station {
    Station {
        id: id.to_string(),
        lat,
        lon,
        temp_f,
        humidity: 70.0,
        wind_speed_mph: 8.0,
        last_update_time: Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap(),
    }
}

fn sf_bbox() -> BoundingBox {
    BoundingBox::new(-122.45, 37.75, -122.41, 37.79)
}

#[test]
fn three_station_city_grid() {
    let stations = vec![
        station("mission", 37.77, -122.43, 60.0),
        station("soma", 37.78, -122.42, 65.0),
        station("glen-park", 37.76, -122.44, 55.0),
    ];

    let grid = interpolate(&stations, sf_bbox(), 1.0).expect("city-scale grid should fit budget");

    assert!(grid.cols >= 1);
    assert!(grid.rows >= 1);
    assert_eq!(grid.cells.len(), grid.cols * grid.rows);
    assert!(grid.east >= sf_bbox().west);
    assert!(grid.north >= sf_bbox().south);

    for cell in &grid.cells {
        if cell.alpha > 0.0 {
            assert!((55.0..=65.0).contains(&cell.temperature));
            assert!(cell.alpha <= 1.0);
        }
    }
}

#[test]
fn single_station_cell_is_exact() {
    let s = station("lone", 37.77, -122.43, 62.5);
    let grid = interpolate(&[s.clone()], sf_bbox(), 0.5).unwrap();

    // Find the cell whose center is nearest the station; at 0.5 km cells it
    // sits well inside the fade band, and its value must not drift far from
    // the raw observation. Whole-box coverage is within 10 km here.
    let mut best = None;
    let mut best_d2 = f64::INFINITY;
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let (lat, lon) = grid.cell_center(row, col);
            let d2 = (lat - s.lat).powi(2) + (lon - s.lon).powi(2);
            if d2 < best_d2 {
                best_d2 = d2;
                best = Some(grid.cell(row, col));
            }
        }
    }

    let cell = best.unwrap();
    // Single station: IDW of one value is that value regardless of distance.
    assert!((cell.temperature - 62.5).abs() < 1e-9);
    assert!((cell.humidity - 70.0).abs() < 1e-9);
    assert!((cell.wind_speed_mph - 8.0).abs() < 1e-9);
    assert_eq!(cell.alpha, 1.0);
}

#[test]
fn empty_station_list_yields_no_grid() {
    assert!(interpolate(&[], sf_bbox(), 0.5).is_none());
    assert!(interpolate(&[], BoundingBox::new(-1.0, -1.0, 1.0, 1.0), 4.0).is_none());
}

#[test]
fn budget_guard_before_allocation() {
    // Bay-Area-wide box at fine resolution: far more than MAX_CELLS.
    let bbox = BoundingBox::new(-123.5, 36.5, -121.0, 39.0);
    let stations = vec![station("a", 37.8, -122.3, 60.0)];

    assert!(interpolate(&stations, bbox, 0.5).is_none());

    // Sanity: the coarse bucket for the same view stays under budget.
    let coarse = CellSize::Coarsest.km();
    let grid = interpolate(&stations, bbox, coarse).unwrap();
    assert!(grid.cols * grid.rows <= MAX_CELLS);
}

#[test]
fn zoom_bucket_drives_memo_key() {
    let bbox = sf_bbox();
    let k1 = GridKey::new(1, bbox, CellSize::for_zoom(10.2).unwrap());
    let k2 = GridKey::new(1, bbox, CellSize::for_zoom(11.7).unwrap());
    let k3 = GridKey::new(1, bbox, CellSize::for_zoom(12.1).unwrap());

    // Fractional zoom inside a bucket reuses the cached grid.
    assert_eq!(k1, k2);
    // Crossing a bucket threshold recomputes.
    assert_ne!(k2, k3);
}
