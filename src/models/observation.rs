//! Weather observation model and ingestion-time unit handling

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quality score attached to observations fetched from the external provider
pub const PROVIDER_QUALITY: u8 = 85;
/// Quality score attached to synthetic fallback observations
pub const SYNTHETIC_QUALITY: u8 = 70;

/// Categorical proxy for localized wind-speed-gradient risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindShearLevel {
    Low,
    Medium,
    High,
}

/// Atmospheric stability class, A most stable through F least stable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StabilityIndex {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl StabilityIndex {
    /// Classes C and D are treated as turbulent for flight purposes
    #[must_use]
    pub fn is_turbulent(self) -> bool {
        matches!(self, Self::C | Self::D)
    }
}

/// Where an observation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    /// Fetched from the external weather provider
    ExternalProvider,
    /// Generated locally because nothing better was available
    Synthetic,
    /// Written by another collaborator (station import, manual entry)
    Imported,
}

impl DataSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExternalProvider => "external-provider",
            Self::Synthetic => "synthetic",
            Self::Imported => "imported",
        }
    }
}

/// Unit of a raw wind speed reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindUnit {
    MetresPerSecond,
    KilometresPerHour,
}

impl WindUnit {
    /// Convert a reading in this unit to m/s
    #[must_use]
    pub fn to_metres_per_second(self, value: f64) -> f64 {
        match self {
            Self::MetresPerSecond => value,
            Self::KilometresPerHour => value * 1000.0 / 3600.0,
        }
    }
}

/// Weather fields as delivered by a provider, before ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWeather {
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_unit: WindUnit,
    pub visibility_km: Option<f64>,
    pub precipitation_mm_h: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub wind_shear: Option<WindShearLevel>,
    pub stability: Option<StabilityIndex>,
}

/// A single weather observation for a monitoring point.
///
/// Wind speed is stored in m/s; conversion happens once in [`Observation::from_raw`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub point_id: String,
    pub observed_at: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: Option<f64>,
    /// Wind speed in m/s
    pub wind_speed_ms: Option<f64>,
    /// Visibility in kilometers
    pub visibility_km: Option<f64>,
    /// Precipitation in mm/h
    pub precipitation_mm_h: Option<f64>,
    /// Relative humidity in percent
    pub humidity_pct: Option<f64>,
    pub wind_shear: Option<WindShearLevel>,
    pub stability: Option<StabilityIndex>,
    pub source: DataSource,
    pub quality: u8,
}

impl Observation {
    /// Ingest provider output, normalising the wind speed to m/s
    #[must_use]
    pub fn from_raw(
        point_id: impl Into<String>,
        observed_at: DateTime<Utc>,
        raw: RawWeather,
        source: DataSource,
        quality: u8,
    ) -> Self {
        Self {
            point_id: point_id.into(),
            observed_at,
            temperature: raw.temperature,
            wind_speed_ms: raw
                .wind_speed
                .map(|speed| raw.wind_unit.to_metres_per_second(speed)),
            visibility_km: raw.visibility_km,
            precipitation_mm_h: raw.precipitation_mm_h,
            humidity_pct: raw.humidity_pct,
            wind_shear: raw.wind_shear,
            stability: raw.stability,
            source,
            quality,
        }
    }

    /// Default conditions used when neither the store nor the provider can help
    #[must_use]
    pub fn synthetic(point_id: impl Into<String>, observed_at: DateTime<Utc>) -> Self {
        let raw = RawWeather {
            temperature: Some(25.0),
            wind_speed: Some(12.0),
            wind_unit: WindUnit::KilometresPerHour,
            visibility_km: Some(10.0),
            precipitation_mm_h: Some(0.0),
            humidity_pct: Some(68.0),
            wind_shear: Some(WindShearLevel::Low),
            stability: Some(StabilityIndex::C),
        };
        Self::from_raw(
            point_id,
            observed_at,
            raw,
            DataSource::Synthetic,
            SYNTHETIC_QUALITY,
        )
    }

    /// Age relative to `now`
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.observed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(wind: f64, unit: WindUnit) -> RawWeather {
        RawWeather {
            temperature: Some(18.0),
            wind_speed: Some(wind),
            wind_unit: unit,
            visibility_km: Some(8.0),
            precipitation_mm_h: Some(0.2),
            humidity_pct: Some(55.0),
            wind_shear: None,
            stability: None,
        }
    }

    #[test]
    fn test_kmh_conversion_is_exact() {
        let obs = Observation::from_raw(
            "p",
            Utc::now(),
            raw(36.0, WindUnit::KilometresPerHour),
            DataSource::Imported,
            90,
        );
        assert_eq!(obs.wind_speed_ms, Some(10.0));
    }

    #[test]
    fn test_ms_passthrough() {
        let obs = Observation::from_raw(
            "p",
            Utc::now(),
            raw(7.5, WindUnit::MetresPerSecond),
            DataSource::Imported,
            90,
        );
        assert_eq!(obs.wind_speed_ms, Some(7.5));
    }

    #[test]
    fn test_synthetic_defaults() {
        let obs = Observation::synthetic("point-1", Utc::now());
        assert_eq!(obs.source, DataSource::Synthetic);
        assert_eq!(obs.quality, SYNTHETIC_QUALITY);
        assert_eq!(obs.stability, Some(StabilityIndex::C));
        assert_eq!(obs.wind_shear, Some(WindShearLevel::Low));
        let wind = obs.wind_speed_ms.unwrap_or_default();
        assert!((wind - 12.0 / 3.6).abs() < 1e-9);
    }

    #[test]
    fn test_categories() {
        assert_eq!(serde_json::to_string(&WindShearLevel::High).unwrap(), "\"high\"");
        let shear: WindShearLevel = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(shear, WindShearLevel::Medium);
        assert!(StabilityIndex::C.is_turbulent());
        assert!(!StabilityIndex::E.is_turbulent());
    }
}
