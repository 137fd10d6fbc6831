//! Station observation records and the metrics derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single weather-station observation.
///
/// Records arrive from the provider already deduplicated and
/// outlier-filtered; the interpolation core treats them as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Provider station identifier.
    pub id: String,
    /// Latitude in degrees, [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, [-180, 180].
    pub lon: f64,
    /// Temperature in degrees Fahrenheit.
    pub temp_f: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Wind speed in miles per hour.
    pub wind_speed_mph: f64,
    /// Time of the observation.
    pub last_update_time: DateTime<Utc>,
}

/// The metrics a heatmap can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Humidity,
    WindSpeedMph,
}

impl Metric {
    /// All metrics, in display order.
    pub const ALL: [Metric; 3] = [Metric::Temperature, Metric::Humidity, Metric::WindSpeedMph];

    /// Extract this metric's value from a station record.
    pub fn of_station(&self, station: &Station) -> f64 {
        match self {
            Metric::Temperature => station.temp_f,
            Metric::Humidity => station.humidity,
            Metric::WindSpeedMph => station.wind_speed_mph,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::WindSpeedMph => "Wind Speed",
        }
    }

    /// Unit label for display.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Temperature => "\u{b0}F",
            Metric::Humidity => "%",
            Metric::WindSpeedMph => "mph",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::WindSpeedMph => "wind_speed_mph",
        };
        f.write_str(s)
    }
}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature" => Ok(Metric::Temperature),
            "humidity" => Ok(Metric::Humidity),
            "wind_speed_mph" | "wind" => Ok(Metric::WindSpeedMph),
            other => Err(UnknownMetric(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown metric: {0}")]
pub struct UnknownMetric(pub String);
