//! Piecewise-linear color scales for metric values.

use heatmap_common::Metric;
use serde::{Deserialize, Serialize};

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a "#RRGGBB" hex string.
    pub fn from_hex(s: &str) -> Result<Self, ScaleError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ScaleError::InvalidColor(s.to_string()));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ScaleError::InvalidColor(s.to_string()))
        };
        Ok(Self {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }
}

/// A color stop: the exact color the scale yields at `value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub value: f64,
    pub color: Rgb,
}

/// A validated piecewise-linear color ramp for one metric.
///
/// Invariants, enforced at construction: at least two stops, values
/// strictly increasing. Lookup clamps outside the stop range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    stops: Vec<ColorStop>,
}

impl ColorScale {
    /// Build a scale, validating the stop invariants.
    pub fn new(stops: Vec<ColorStop>) -> Result<Self, ScaleError> {
        if stops.len() < 2 {
            return Err(ScaleError::TooFewStops(stops.len()));
        }
        for pair in stops.windows(2) {
            if pair[1].value <= pair[0].value {
                return Err(ScaleError::NonIncreasingStops {
                    prev: pair[0].value,
                    next: pair[1].value,
                });
            }
        }
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Value range covered by the stops: (first, last).
    pub fn domain(&self) -> (f64, f64) {
        (
            self.stops.first().map(|s| s.value).unwrap_or(0.0),
            self.stops.last().map(|s| s.value).unwrap_or(0.0),
        )
    }

    /// Map a metric value to a color.
    ///
    /// Clamps below the first and above the last stop; between adjacent
    /// stops each channel interpolates linearly with rounding. A value that
    /// lands exactly on a stop returns that stop's exact color.
    pub fn color_at(&self, value: f64) -> Rgb {
        let first = &self.stops[0];
        if value <= first.value {
            return first.color;
        }
        let last = &self.stops[self.stops.len() - 1];
        if value >= last.value {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (low, high) = (&pair[0], &pair[1]);
            if value <= high.value {
                let t = (value - low.value) / (high.value - low.value);
                let lerp = |a: u8, b: u8| -> u8 {
                    (a as f64 + t * (b as f64 - a as f64)).round() as u8
                };
                return Rgb {
                    r: lerp(low.color.r, high.color.r),
                    g: lerp(low.color.g, high.color.g),
                    b: lerp(low.color.b, high.color.b),
                };
            }
        }

        last.color
    }

    /// Built-in scale for a metric, carrying the production stop tables.
    pub fn for_metric(metric: Metric) -> ColorScale {
        let stops = match metric {
            Metric::Temperature => vec![
                ColorStop { value: 35.0, color: Rgb::new(0x00, 0xcf, 0xff) },
                ColorStop { value: 45.0, color: Rgb::new(0x3a, 0x86, 0xff) },
                ColorStop { value: 52.0, color: Rgb::new(0x06, 0xd6, 0xa0) },
                ColorStop { value: 58.0, color: Rgb::new(0xff, 0xd1, 0x66) },
                ColorStop { value: 65.0, color: Rgb::new(0xff, 0x99, 0x00) },
                ColorStop { value: 75.0, color: Rgb::new(0xef, 0x23, 0x3c) },
            ],
            Metric::Humidity => vec![
                ColorStop { value: 10.0, color: Rgb::new(0xfe, 0xf9, 0xc3) },
                ColorStop { value: 30.0, color: Rgb::new(0x86, 0xef, 0xac) },
                ColorStop { value: 50.0, color: Rgb::new(0x22, 0xd3, 0xee) },
                ColorStop { value: 70.0, color: Rgb::new(0x3b, 0x82, 0xf6) },
                ColorStop { value: 90.0, color: Rgb::new(0x1e, 0x3a, 0x8a) },
            ],
            Metric::WindSpeedMph => vec![
                ColorStop { value: 0.0, color: Rgb::new(0xf0, 0xfd, 0xf4) },
                ColorStop { value: 5.0, color: Rgb::new(0x86, 0xef, 0xac) },
                ColorStop { value: 10.0, color: Rgb::new(0x22, 0xc5, 0x5e) },
                ColorStop { value: 20.0, color: Rgb::new(0x0e, 0xa5, 0xe9) },
                ColorStop { value: 30.0, color: Rgb::new(0x7c, 0x3a, 0xed) },
            ],
        };
        // Built-in tables satisfy the invariants by inspection.
        ColorScale::new(stops).expect("built-in color scale is valid")
    }
}

/// Scale construction and parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum ScaleError {
    #[error("color scale needs at least 2 stops, got {0}")]
    TooFewStops(usize),

    #[error("color stops must be strictly increasing: {prev} then {next}")]
    NonIncreasingStops { prev: f64, next: f64 },

    #[error("invalid color: {0}")]
    InvalidColor(String),
}
