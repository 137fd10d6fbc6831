//! Synoptic Data (synopticdata.com) station provider.

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::provider::StationProvider;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use heatmap_common::Station;
use serde::Deserialize;
use tracing::{debug, warn};

const LATEST_URL: &str = "https://api.synopticdata.com/v2/stations/latest";

/// Provider backed by the Synoptic `stations/latest` endpoint.
///
/// Queries in english units (Fahrenheit, mph) for air temperature, relative
/// humidity, and wind speed within a radius of the query point.
pub struct SynopticProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl SynopticProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config
            .validate()
            .map_err(ProviderError::NotConfigured)?;
        Ok(Self {
            client: reqwest::Client::new(),
            config,
        })
    }
}

#[async_trait]
impl StationProvider for SynopticProvider {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<Vec<Station>> {
        let radius = format!("{},{},{}", lat, lon, self.config.radius_miles);
        let response = self
            .client
            .get(LATEST_URL)
            .query(&[
                ("token", self.config.api_token.as_str()),
                ("radius", radius.as_str()),
                ("within", &self.config.within_minutes.to_string()),
                ("vars", "air_temp,relative_humidity,wind_speed"),
                ("units", "english"),
                ("output", "json"),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        let payload: SynopticResponse = response.json().await?;
        let stations = map_response(payload)?;
        debug!(count = stations.len(), lat, lon, "fetched station observations");
        Ok(stations)
    }
}

// === Synoptic wire format ===

#[derive(Debug, Deserialize)]
pub(crate) struct SynopticResponse {
    #[serde(rename = "STATION", default)]
    stations: Vec<SynopticStation>,
    #[serde(rename = "SUMMARY")]
    summary: Option<Summary>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    #[serde(rename = "RESPONSE_CODE")]
    response_code: i32,
    #[serde(rename = "RESPONSE_MESSAGE", default)]
    response_message: String,
}

#[derive(Debug, Deserialize)]
struct SynopticStation {
    #[serde(rename = "STID")]
    stid: String,
    #[serde(rename = "LATITUDE")]
    latitude: String,
    #[serde(rename = "LONGITUDE")]
    longitude: String,
    #[serde(rename = "OBSERVATIONS", default)]
    observations: Observations,
}

#[derive(Debug, Default, Deserialize)]
struct Observations {
    #[serde(rename = "air_temp_value_1")]
    air_temp: Option<ObservedValue>,
    #[serde(rename = "relative_humidity_value_1")]
    relative_humidity: Option<ObservedValue>,
    #[serde(rename = "wind_speed_value_1")]
    wind_speed: Option<ObservedValue>,
}

#[derive(Debug, Deserialize)]
struct ObservedValue {
    value: Option<f64>,
    date_time: Option<DateTime<Utc>>,
}

/// Map a Synoptic payload into common station records.
///
/// Records missing coordinates or a temperature reading are skipped; missing
/// humidity or wind default to zero, matching upstream display behavior.
pub(crate) fn map_response(payload: SynopticResponse) -> Result<Vec<Station>> {
    if let Some(summary) = &payload.summary {
        if summary.response_code != 1 {
            return Err(ProviderError::Api(summary.response_message.clone()));
        }
    }

    let mut out = Vec::with_capacity(payload.stations.len());
    for raw in payload.stations {
        let (lat, lon) = match (raw.latitude.parse::<f64>(), raw.longitude.parse::<f64>()) {
            (Ok(lat), Ok(lon)) => (lat, lon),
            _ => {
                warn!(stid = %raw.stid, "skipping station with unparseable coordinates");
                continue;
            }
        };

        let temp = match &raw.observations.air_temp {
            Some(ObservedValue {
                value: Some(value),
                date_time: Some(observed_at),
            }) => (*value, *observed_at),
            _ => continue,
        };

        let value_of = |obs: &Option<ObservedValue>| obs.as_ref().and_then(|o| o.value);

        out.push(Station {
            id: raw.stid,
            lat,
            lon,
            temp_f: temp.0,
            humidity: value_of(&raw.observations.relative_humidity).unwrap_or(0.0),
            wind_speed_mph: value_of(&raw.observations.wind_speed).unwrap_or(0.0),
            last_update_time: temp.1,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SynopticResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_maps_complete_stations() {
        let payload = parse(
            r#"{
                "STATION": [{
                    "STID": "SFOC1",
                    "LATITUDE": "37.77",
                    "LONGITUDE": "-122.43",
                    "OBSERVATIONS": {
                        "air_temp_value_1": {"value": 61.2, "date_time": "2024-03-01T18:30:00Z"},
                        "relative_humidity_value_1": {"value": 72.0, "date_time": "2024-03-01T18:30:00Z"},
                        "wind_speed_value_1": {"value": 9.5, "date_time": "2024-03-01T18:30:00Z"}
                    }
                }],
                "SUMMARY": {"RESPONSE_CODE": 1, "RESPONSE_MESSAGE": "OK"}
            }"#,
        );

        let stations = map_response(payload).unwrap();
        assert_eq!(stations.len(), 1);
        let s = &stations[0];
        assert_eq!(s.id, "SFOC1");
        assert_eq!(s.lat, 37.77);
        assert_eq!(s.lon, -122.43);
        assert_eq!(s.temp_f, 61.2);
        assert_eq!(s.humidity, 72.0);
        assert_eq!(s.wind_speed_mph, 9.5);
    }

    #[test]
    fn test_skips_records_without_temp_or_coords() {
        let payload = parse(
            r#"{
                "STATION": [
                    {
                        "STID": "NOTMP",
                        "LATITUDE": "37.70",
                        "LONGITUDE": "-122.40",
                        "OBSERVATIONS": {
                            "relative_humidity_value_1": {"value": 80.0, "date_time": "2024-03-01T18:30:00Z"}
                        }
                    },
                    {
                        "STID": "BADLOC",
                        "LATITUDE": "not-a-number",
                        "LONGITUDE": "-122.40",
                        "OBSERVATIONS": {
                            "air_temp_value_1": {"value": 60.0, "date_time": "2024-03-01T18:30:00Z"}
                        }
                    },
                    {
                        "STID": "GOOD",
                        "LATITUDE": "37.75",
                        "LONGITUDE": "-122.45",
                        "OBSERVATIONS": {
                            "air_temp_value_1": {"value": 58.4, "date_time": "2024-03-01T18:25:00Z"}
                        }
                    }
                ],
                "SUMMARY": {"RESPONSE_CODE": 1, "RESPONSE_MESSAGE": "OK"}
            }"#,
        );

        let stations = map_response(payload).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "GOOD");
        // Missing humidity/wind default to zero.
        assert_eq!(stations[0].humidity, 0.0);
        assert_eq!(stations[0].wind_speed_mph, 0.0);
    }

    #[test]
    fn test_api_failure_summary() {
        let payload = parse(
            r#"{"STATION": [], "SUMMARY": {"RESPONSE_CODE": 2, "RESPONSE_MESSAGE": "invalid token"}}"#,
        );
        match map_response(payload) {
            Err(ProviderError::Api(msg)) => assert_eq!(msg, "invalid token"),
            other => panic!("expected Api error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_provider_requires_token() {
        let err = SynopticProvider::new(ProviderConfig::default()).err().unwrap();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
