use crate::models::{Observation, ThresholdProfile, WindShearLevel};
use crate::suitability::factors;

/// Weather-derived inputs shared by every risk grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskInputs {
    /// Mean of the six factor risks, in `[0, 1]`
    pub base_risk: f64,
    pub shear_high: bool,
    pub turbulent: bool,
}

impl RiskInputs {
    #[must_use]
    pub fn from_observation(obs: &Observation, profile: &ThresholdProfile) -> Self {
        let readings = factors::assess(obs, profile);
        let base_risk = if readings.is_empty() {
            0.5
        } else {
            readings.iter().map(|r| r.risk).sum::<f64>() / readings.len() as f64
        };

        Self {
            base_risk,
            shear_high: obs.wind_shear == Some(WindShearLevel::High),
            turbulent: obs.stability.is_some_and(|s| s.is_turbulent()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataSource, RawWeather, StabilityIndex, WindUnit};
    use chrono::Utc;

    #[test]
    fn test_benign_weather_has_low_base_risk() {
        let raw = RawWeather {
            temperature: Some(20.0),
            wind_speed: Some(2.0),
            wind_unit: WindUnit::MetresPerSecond,
            visibility_km: Some(10.0),
            precipitation_mm_h: Some(0.0),
            humidity_pct: Some(40.0),
            wind_shear: Some(WindShearLevel::Low),
            stability: Some(StabilityIndex::A),
        };
        let obs = Observation::from_raw("p", Utc::now(), raw, DataSource::Imported, 90);
        let inputs = RiskInputs::from_observation(&obs, &ThresholdProfile::default());
        // (0.3 + 0.2 + 0.1 + 0.1 + 0.1 + 0.2) / 6
        assert!((inputs.base_risk - 1.0 / 6.0).abs() < 1e-9);
        assert!(!inputs.shear_high);
        assert!(!inputs.turbulent);
    }

    #[test]
    fn test_synthetic_weather_is_turbulent() {
        let obs = Observation::synthetic("p", Utc::now());
        let inputs = RiskInputs::from_observation(&obs, &ThresholdProfile::default());
        assert!(inputs.turbulent);
        // (0.3 + 0.2 + 0.1 + 0.1 + 0.1 + 0.7) / 6
        assert!((inputs.base_risk - 0.25).abs() < 1e-9);
    }
}
