use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;
use tracing::{debug, info};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::models::{RawWeather, StabilityIndex, WindShearLevel, WindUnit};
use crate::{Result, SkywatchError};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation,wind_speed_10m,wind_gusts_10m,cloud_cover,visibility,is_day";

/// Current-conditions client for the Open-Meteo forecast API
pub struct OpenMeteoProvider {
    client: ClientWithMiddleware,
    base_url: String,
}

impl OpenMeteoProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("skywatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SkywatchError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn current_url(&self, longitude: f64, latitude: f64) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current={}&timezone=UTC",
            self.base_url, latitude, longitude, CURRENT_FIELDS
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn fetch(&self, longitude: f64, latitude: f64) -> Result<RawWeather> {
        let url = self.current_url(longitude, latitude);
        debug!("Requesting current conditions: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SkywatchError::upstream(format!("Open-Meteo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SkywatchError::upstream(format!("Open-Meteo returned an error: {e}")))?;

        let body: openmeteo::CurrentResponse = response.json().await.map_err(|e| {
            SkywatchError::upstream(format!("Failed to parse Open-Meteo response: {e}"))
        })?;

        let current = body
            .current
            .ok_or_else(|| SkywatchError::upstream("Open-Meteo response has no current block"))?;
        info!(
            "Fetched current conditions at grid cell ({}, {}) for {}",
            body.latitude, body.longitude, current.time
        );
        Ok(current.into())
    }

    fn name(&self) -> &'static str {
        "open-meteo"
    }
}

/// Shear category from the spread between gusts and mean wind, both in km/h
#[must_use]
pub fn shear_from_gusts(wind_kmh: f64, gusts_kmh: f64) -> WindShearLevel {
    let spread = gusts_kmh - wind_kmh;
    if spread >= 25.0 {
        WindShearLevel::High
    } else if spread >= 12.0 {
        WindShearLevel::Medium
    } else {
        WindShearLevel::Low
    }
}

/// Pasquill stability class from 10 m wind (m/s), cloud cover (%) and day/night.
///
/// Cloud cover stands in for insolation by day and for overcast by night.
/// Mixed classes of the reference table resolve to the more unstable letter.
#[must_use]
pub fn pasquill_class(wind_ms: f64, cloud_pct: f64, is_day: bool) -> StabilityIndex {
    use StabilityIndex::{A, B, C, D, E, F};

    if is_day {
        let column = if cloud_pct < 30.0 {
            0
        } else if cloud_pct < 70.0 {
            1
        } else {
            2
        };
        let row: [StabilityIndex; 3] = if wind_ms < 2.0 {
            [A, A, B]
        } else if wind_ms < 3.0 {
            [A, B, C]
        } else if wind_ms < 5.0 {
            [B, B, C]
        } else if wind_ms < 6.0 {
            [C, C, D]
        } else {
            [C, D, D]
        };
        row[column]
    } else {
        let overcast = cloud_pct >= 50.0;
        if wind_ms < 3.0 {
            if overcast { E } else { F }
        } else if wind_ms < 5.0 {
            if overcast { D } else { E }
        } else {
            D
        }
    }
}

/// `OpenMeteo` API response structures and conversion utilities
mod openmeteo {
    use super::{RawWeather, WindUnit, pasquill_class, shear_from_gusts};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub latitude: f64,
        pub longitude: f64,
        pub current: Option<CurrentData>,
    }

    /// Current block; wind is in km/h and visibility in meters
    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        pub time: String,
        #[serde(rename = "temperature_2m")]
        pub temperature: Option<f64>,
        #[serde(rename = "relative_humidity_2m")]
        pub humidity: Option<f64>,
        pub precipitation: Option<f64>,
        #[serde(rename = "wind_speed_10m")]
        pub wind_speed: Option<f64>,
        #[serde(rename = "wind_gusts_10m")]
        pub wind_gusts: Option<f64>,
        pub cloud_cover: Option<f64>,
        pub visibility: Option<f64>,
        pub is_day: Option<u8>,
    }

    impl From<CurrentData> for RawWeather {
        fn from(current: CurrentData) -> Self {
            let wind_shear = match (current.wind_speed, current.wind_gusts) {
                (Some(speed), Some(gusts)) => Some(shear_from_gusts(speed, gusts)),
                _ => None,
            };
            let stability = match (current.wind_speed, current.cloud_cover) {
                (Some(speed), Some(cloud)) => Some(pasquill_class(
                    WindUnit::KilometresPerHour.to_metres_per_second(speed),
                    cloud,
                    current.is_day.unwrap_or(1) == 1,
                )),
                _ => None,
            };

            RawWeather {
                temperature: current.temperature,
                wind_speed: current.wind_speed,
                wind_unit: WindUnit::KilometresPerHour,
                visibility_km: current.visibility.map(|meters| meters / 1000.0),
                precipitation_mm_h: current.precipitation,
                humidity_pct: current.humidity,
                wind_shear,
                stability,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_url() {
        let provider = OpenMeteoProvider::new(&WeatherConfig {
            base_url: "https://example.test/v1/".to_string(),
            ..WeatherConfig::default()
        })
        .unwrap();
        let url = provider.current_url(120.5, 36.25);
        assert!(url.starts_with("https://example.test/v1/forecast?latitude=36.25&longitude=120.5"));
        assert!(url.contains("wind_gusts_10m"));
    }

    #[test]
    fn test_parse_current_response() {
        let json = r#"{
            "latitude": 36.0,
            "longitude": 120.0,
            "current": {
                "time": "2025-06-01T08:00",
                "interval": 900,
                "temperature_2m": 21.4,
                "relative_humidity_2m": 64,
                "precipitation": 0.0,
                "wind_speed_10m": 36.0,
                "wind_gusts_10m": 50.0,
                "cloud_cover": 80,
                "visibility": 24140.0,
                "is_day": 1
            }
        }"#;
        let body: openmeteo::CurrentResponse = serde_json::from_str(json).unwrap();
        assert_eq!((body.latitude, body.longitude), (36.0, 120.0));
        let raw: RawWeather = body.current.unwrap().into();
        assert_eq!(raw.wind_unit, WindUnit::KilometresPerHour);
        assert_eq!(raw.wind_speed, Some(36.0));
        assert_eq!(raw.humidity_pct, Some(64.0));
        assert_eq!(raw.wind_shear, Some(WindShearLevel::Medium));
        assert_eq!(raw.stability, Some(StabilityIndex::D));
        assert!((raw.visibility_km.unwrap() - 24.14).abs() < 1e-9);
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let json = r#"{"latitude": 1.0, "longitude": 2.0, "current": {"time": "2025-06-01T08:00"}}"#;
        let body: openmeteo::CurrentResponse = serde_json::from_str(json).unwrap();
        let raw: RawWeather = body.current.unwrap().into();
        assert!(raw.wind_speed.is_none());
        assert!(raw.wind_shear.is_none());
        assert!(raw.stability.is_none());
    }

    #[test]
    fn test_shear_from_gusts() {
        assert_eq!(shear_from_gusts(20.0, 25.0), WindShearLevel::Low);
        assert_eq!(shear_from_gusts(20.0, 32.0), WindShearLevel::Medium);
        assert_eq!(shear_from_gusts(20.0, 45.0), WindShearLevel::High);
    }

    #[test]
    fn test_pasquill_class() {
        assert_eq!(pasquill_class(1.0, 10.0, true), StabilityIndex::A);
        assert_eq!(pasquill_class(4.0, 50.0, true), StabilityIndex::B);
        assert_eq!(pasquill_class(8.0, 90.0, true), StabilityIndex::D);
        assert_eq!(pasquill_class(1.0, 10.0, false), StabilityIndex::F);
        assert_eq!(pasquill_class(4.0, 80.0, false), StabilityIndex::D);
        assert_eq!(pasquill_class(7.0, 0.0, false), StabilityIndex::D);
    }
}
