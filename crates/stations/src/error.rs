//! Error types for station providers.

use thiserror::Error;

/// Errors that can occur while fetching station observations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider is not configured (e.g. missing API token).
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// The upstream HTTP request failed.
    #[error("upstream request failed: {0}")]
    Http(String),

    /// The upstream returned a non-success application response.
    #[error("upstream API error: {0}")]
    Api(String),

    /// The upstream payload could not be decoded.
    #[error("failed to decode upstream payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Http(err.to_string())
        }
    }
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
