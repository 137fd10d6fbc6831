//! Common types and utilities shared across all station-heatmap services.

pub mod bbox;
pub mod error;
pub mod station;

pub use bbox::BoundingBox;
pub use error::{HeatmapError, HeatmapResult};
pub use station::{Metric, Station};
