//! Rendering for interpolated station grids.
//!
//! - Piecewise-linear color scales ([`scale`])
//! - Grid-to-RGBA rasterization ([`raster`])
//! - PNG encoding ([`png`])
//! - Legend strips ([`legend`])

pub mod legend;
pub mod png;
pub mod raster;
pub mod scale;

pub use raster::rasterize;
pub use scale::{ColorScale, ColorStop, Rgb, ScaleError};
