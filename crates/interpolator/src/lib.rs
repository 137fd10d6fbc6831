//! Spatial interpolation of sparse station observations onto a regular grid.
//!
//! The entry point is [`interpolate`], which turns a set of geolocated
//! readings plus a viewport bounding box into a row-major grid of estimated
//! temperature/humidity/wind values with a coverage-fade alpha per cell.
//! [`CellSize`] buckets a continuous zoom level into a discrete resolution,
//! and [`GridKey`] is the memoization key callers should cache grids under.

pub mod grid;
pub mod key;
pub mod zoom;

pub use grid::{interpolate, Cell, Grid, MAX_CELLS};
pub use key::GridKey;
pub use zoom::{CellSize, MIN_ZOOM};
