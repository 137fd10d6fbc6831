//! Error types for station-heatmap services.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for heatmap service operations.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Request errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Invalid bbox: {0}")]
    InvalidBbox(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    // === Data errors ===
    #[error("Station provider error: {0}")]
    ProviderError(String),

    // === Rendering errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    // === Infrastructure errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl HeatmapError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            HeatmapError::MissingParameter(_)
            | HeatmapError::InvalidParameter { .. }
            | HeatmapError::InvalidBbox(_)
            | HeatmapError::UnknownMetric(_) => 400,

            HeatmapError::ProviderError(_) => 502,

            HeatmapError::RenderError(_) | HeatmapError::InternalError(_) => 500,
        }
    }
}

impl From<crate::bbox::BboxParseError> for HeatmapError {
    fn from(err: crate::bbox::BboxParseError) -> Self {
        HeatmapError::InvalidBbox(err.to_string())
    }
}

impl From<crate::station::UnknownMetric> for HeatmapError {
    fn from(err: crate::station::UnknownMetric) -> Self {
        HeatmapError::UnknownMetric(err.0)
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        HeatmapError::InternalError(format!("JSON error: {}", err))
    }
}
