//! The station provider trait.

use crate::error::Result;
use async_trait::async_trait;
use heatmap_common::Station;

/// Source of station observations around a query point.
///
/// Implementations map upstream payloads into the common [`Station`] schema
/// and drop records missing coordinates or a temperature reading. They do
/// not retry, authenticate beyond their own credentials, or judge staleness;
/// those concerns belong to callers.
#[async_trait]
pub trait StationProvider: Send + Sync {
    /// Fetch the latest observations near `(lat, lon)`.
    async fn fetch(&self, lat: f64, lon: f64) -> Result<Vec<Station>>;
}
