//! Station observation providers.
//!
//! The interpolation core consumes a read-only list of [`Station`] records;
//! this crate owns the boundary that produces them. Providers return records
//! already mapped to the common schema; retry policy and outlier filtering
//! are out of scope and live with the caller (or nowhere).
//!
//! [`Station`]: heatmap_common::Station

pub mod config;
pub mod error;
pub mod provider;
pub mod synoptic;

pub use config::ProviderConfig;
pub use error::{ProviderError, Result};
pub use provider::StationProvider;
pub use synoptic::SynopticProvider;
