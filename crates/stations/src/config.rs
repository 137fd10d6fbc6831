//! Configuration for station providers.

use serde::{Deserialize, Serialize};

/// Configuration for the Synoptic station provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Synoptic API token.
    pub api_token: String,

    /// Search radius around the query point, in miles.
    pub radius_miles: u32,

    /// Only accept observations newer than this, in minutes.
    pub within_minutes: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            radius_miles: 20,
            within_minutes: 60,
        }
    }
}

impl ProviderConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SYNOPTIC_API_TOKEN") {
            config.api_token = val;
        }

        if let Ok(val) = std::env::var("STATION_RADIUS_MILES") {
            if let Ok(radius) = val.parse() {
                config.radius_miles = radius;
            }
        }

        if let Ok(val) = std::env::var("STATION_WITHIN_MINUTES") {
            if let Ok(minutes) = val.parse() {
                config.within_minutes = minutes;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_token.is_empty() || self.api_token == "your_token_here" {
            return Err("SYNOPTIC_API_TOKEN is not set".to_string());
        }

        if self.radius_miles == 0 {
            return Err("radius_miles must be > 0".to_string());
        }

        if self.within_minutes == 0 {
            return Err("within_minutes must be > 0".to_string());
        }

        Ok(())
    }
}
