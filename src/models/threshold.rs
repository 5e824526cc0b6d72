//! Aircraft operating limits

use serde::{Deserialize, Serialize};

/// Aircraft id used when a request does not name one
pub const DEFAULT_AIRCRAFT_ID: &str = "aircraft-1";

/// Highest turbulence an aircraft type tolerates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurbulenceLevel {
    Light,
    Moderate,
    Severe,
}

/// Weather limits for one aircraft type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdProfile {
    pub aircraft_id: String,
    /// Maximum wind speed in m/s
    pub max_wind_speed: f64,
    /// Maximum wind shear in m/s
    pub max_wind_shear: f64,
    /// Minimum visibility in km
    pub min_visibility: f64,
    /// Maximum precipitation in mm/h
    pub max_precipitation: f64,
    /// Minimum cloud base in m
    pub min_cloud_base: Option<f64>,
    pub temperature_min: f64,
    pub temperature_max: f64,
    /// Maximum relative humidity in percent
    pub max_humidity: f64,
    pub max_turbulence: TurbulenceLevel,
}

impl Default for ThresholdProfile {
    fn default() -> Self {
        Self {
            aircraft_id: "default".to_string(),
            max_wind_speed: 12.0,
            max_wind_shear: 5.0,
            min_visibility: 1.5,
            max_precipitation: 5.0,
            min_cloud_base: None,
            temperature_min: -10.0,
            temperature_max: 40.0,
            max_humidity: 90.0,
            max_turbulence: TurbulenceLevel::Moderate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_values() {
        let profile = ThresholdProfile::default();
        assert_eq!(profile.max_wind_speed, 12.0);
        assert_eq!(profile.max_wind_shear, 5.0);
        assert_eq!(profile.min_visibility, 1.5);
        assert_eq!(profile.max_precipitation, 5.0);
        assert_eq!(profile.max_humidity, 90.0);
        assert_eq!(profile.temperature_min, -10.0);
        assert_eq!(profile.temperature_max, 40.0);
        assert_eq!(profile.max_turbulence, TurbulenceLevel::Moderate);
    }
}
