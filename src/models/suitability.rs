//! Suitability factors, scores and projections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weather dimension assessed against the aircraft limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Wind,
    Visibility,
    Precipitation,
    Humidity,
    WindShear,
    Turbulence,
}

impl Factor {
    /// Every factor in evaluation order
    pub const ALL: [Factor; 6] = [
        Factor::Wind,
        Factor::Visibility,
        Factor::Precipitation,
        Factor::Humidity,
        Factor::WindShear,
        Factor::Turbulence,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Wind => "wind",
            Self::Visibility => "visibility",
            Self::Precipitation => "precipitation",
            Self::Humidity => "humidity",
            Self::WindShear => "wind_shear",
            Self::Turbulence => "turbulence",
        }
    }

    /// Dashboard label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Wind => "风速",
            Self::Visibility => "能见度",
            Self::Precipitation => "降水",
            Self::Humidity => "湿度",
            Self::WindShear => "风切变",
            Self::Turbulence => "湍流",
        }
    }

    /// Accepts the key (case-insensitive, `-` or `_`) or the dashboard label
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|factor| factor.key() == normalized || factor.label() == value.trim())
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Outcome of assessing one factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorResult {
    pub factor: Factor,
    pub suitable: bool,
    pub value: f64,
}

/// Qualitative verdict derived from the overall percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Suitable,
    Marginal,
    Caution,
    Unsuitable,
}

impl Recommendation {
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Self::Suitable
        } else if percentage >= 60.0 {
            Self::Marginal
        } else if percentage >= 40.0 {
            Self::Caution
        } else {
            Self::Unsuitable
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Suitable => "适飞",
            Self::Marginal => "较适",
            Self::Caution => "谨慎",
            Self::Unsuitable => "不适",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Current assessment of a monitoring point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilitySnapshot {
    pub calculated_at: DateTime<Utc>,
    pub factors: Vec<FactorResult>,
    pub percentage: f64,
    pub recommendation: Recommendation,
}

impl SuitabilitySnapshot {
    #[must_use]
    pub fn factor(&self, factor: Factor) -> Option<&FactorResult> {
        self.factors.iter().find(|result| result.factor == factor)
    }
}

/// Projected assessment at one future instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePointProjection {
    pub time_point: DateTime<Utc>,
    pub point_id: String,
    pub factors: Vec<FactorResult>,
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_parse() {
        assert_eq!(Factor::parse("wind"), Some(Factor::Wind));
        assert_eq!(Factor::parse("Wind-Shear"), Some(Factor::WindShear));
        assert_eq!(Factor::parse("湍流"), Some(Factor::Turbulence));
        assert_eq!(Factor::parse("pressure"), None);
    }

    #[test]
    fn test_recommendation_labels() {
        assert_eq!(Recommendation::from_percentage(100.0).label(), "适飞");
        assert_eq!(Recommendation::from_percentage(79.9).label(), "较适");
        assert_eq!(Recommendation::from_percentage(40.0).label(), "谨慎");
        assert_eq!(Recommendation::from_percentage(0.0).label(), "不适");
    }

    #[test]
    fn test_snapshot_lookup() {
        let snapshot = SuitabilitySnapshot {
            calculated_at: Utc::now(),
            factors: vec![FactorResult {
                factor: Factor::Humidity,
                suitable: true,
                value: 40.0,
            }],
            percentage: 100.0,
            recommendation: Recommendation::Suitable,
        };
        assert!(snapshot.factor(Factor::Humidity).is_some());
        assert!(snapshot.factor(Factor::Wind).is_none());
    }
}
