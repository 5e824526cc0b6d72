//! Factor rule table and evaluator.
//!
//! Every factor is defined once in [`FACTOR_TABLE`]: how its reading is
//! extracted from an observation, how it is compared with the aircraft
//! limits and which risk weights it contributes to the risk grids.

use crate::models::{
    Factor, FactorResult, Observation, StabilityIndex, ThresholdProfile, WindShearLevel,
};

/// Risk contributed by a factor when it fails (`bad`) or passes (`good`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskWeights {
    pub bad: f64,
    pub good: f64,
}

impl RiskWeights {
    const fn new(bad: f64, good: f64) -> Self {
        Self { bad, good }
    }

    fn pick(self, suitable: bool) -> f64 {
        if suitable { self.good } else { self.bad }
    }
}

/// A single factor assessment including its risk contribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorReading {
    pub factor: Factor,
    pub suitable: bool,
    pub value: f64,
    pub risk: f64,
}

impl From<FactorReading> for FactorResult {
    fn from(reading: FactorReading) -> Self {
        FactorResult {
            factor: reading.factor,
            suitable: reading.suitable,
            value: reading.value,
        }
    }
}

type Extractor = fn(&Observation) -> Option<f64>;
type Limit = fn(&ThresholdProfile) -> f64;

enum Rule {
    /// Suitable while the reading stays at or below the limit
    AtMost {
        observed: Extractor,
        limit: Limit,
        weights: RiskWeights,
    },
    /// Suitable while the reading stays at or above the limit
    AtLeast {
        observed: Extractor,
        limit: Limit,
        weights: RiskWeights,
    },
    WindShear,
    Turbulence,
}

pub struct FactorDefinition {
    pub factor: Factor,
    rule: Rule,
}

fn wind_speed(obs: &Observation) -> Option<f64> {
    obs.wind_speed_ms
}
fn visibility(obs: &Observation) -> Option<f64> {
    obs.visibility_km
}
fn precipitation(obs: &Observation) -> Option<f64> {
    obs.precipitation_mm_h
}
fn humidity(obs: &Observation) -> Option<f64> {
    obs.humidity_pct
}

fn max_wind_speed(profile: &ThresholdProfile) -> f64 {
    profile.max_wind_speed
}
fn min_visibility(profile: &ThresholdProfile) -> f64 {
    profile.min_visibility
}
fn max_precipitation(profile: &ThresholdProfile) -> f64 {
    profile.max_precipitation
}
fn max_humidity(profile: &ThresholdProfile) -> f64 {
    profile.max_humidity
}

/// Shear risk by level: high, medium, low or unset
const SHEAR_RISK: [f64; 3] = [0.9, 0.5, 0.1];
const TURBULENCE_WEIGHTS: RiskWeights = RiskWeights::new(0.7, 0.2);

pub const FACTOR_TABLE: [FactorDefinition; 6] = [
    FactorDefinition {
        factor: Factor::Wind,
        rule: Rule::AtMost {
            observed: wind_speed,
            limit: max_wind_speed,
            weights: RiskWeights::new(0.8, 0.3),
        },
    },
    FactorDefinition {
        factor: Factor::Visibility,
        rule: Rule::AtLeast {
            observed: visibility,
            limit: min_visibility,
            weights: RiskWeights::new(0.7, 0.2),
        },
    },
    FactorDefinition {
        factor: Factor::Precipitation,
        rule: Rule::AtMost {
            observed: precipitation,
            limit: max_precipitation,
            weights: RiskWeights::new(0.6, 0.1),
        },
    },
    FactorDefinition {
        factor: Factor::Humidity,
        rule: Rule::AtMost {
            observed: humidity,
            limit: max_humidity,
            weights: RiskWeights::new(0.5, 0.1),
        },
    },
    FactorDefinition {
        factor: Factor::WindShear,
        rule: Rule::WindShear,
    },
    FactorDefinition {
        factor: Factor::Turbulence,
        rule: Rule::Turbulence,
    },
];

impl FactorDefinition {
    #[must_use]
    pub fn assess(&self, obs: &Observation, profile: &ThresholdProfile) -> FactorReading {
        let (suitable, value, risk) = match &self.rule {
            Rule::AtMost {
                observed,
                limit,
                weights,
            } => numeric(observed(obs), |v| v <= limit(profile), *weights),
            Rule::AtLeast {
                observed,
                limit,
                weights,
            } => numeric(observed(obs), |v| v >= limit(profile), *weights),
            Rule::WindShear => match obs.wind_shear {
                Some(WindShearLevel::High) => (false, 8.0, SHEAR_RISK[0]),
                Some(WindShearLevel::Medium) => (true, 5.0, SHEAR_RISK[1]),
                Some(WindShearLevel::Low) | None => (true, 2.0, SHEAR_RISK[2]),
            },
            Rule::Turbulence => {
                let value = match obs.stability {
                    Some(StabilityIndex::A | StabilityIndex::B) => 0.3,
                    Some(StabilityIndex::C) => 0.6,
                    Some(StabilityIndex::D | StabilityIndex::E | StabilityIndex::F) => 0.8,
                    None => 0.5,
                };
                let suitable = !obs.stability.is_some_and(StabilityIndex::is_turbulent);
                (suitable, value, TURBULENCE_WEIGHTS.pick(suitable))
            }
        };

        FactorReading {
            factor: self.factor,
            suitable,
            value,
            risk,
        }
    }
}

/// Absent readings fail the factor with value 0 and the bad risk weight
fn numeric(
    reading: Option<f64>,
    passes: impl Fn(f64) -> bool,
    weights: RiskWeights,
) -> (bool, f64, f64) {
    match reading {
        Some(value) => {
            let suitable = passes(value);
            (suitable, value, weights.pick(suitable))
        }
        None => (false, 0.0, weights.bad),
    }
}

/// All six readings in table order
#[must_use]
pub fn assess(obs: &Observation, profile: &ThresholdProfile) -> Vec<FactorReading> {
    FACTOR_TABLE
        .iter()
        .map(|definition| definition.assess(obs, profile))
        .collect()
}

/// Pure evaluation of an observation against aircraft limits
#[must_use]
pub fn evaluate(obs: &Observation, profile: &ThresholdProfile) -> Vec<FactorResult> {
    assess(obs, profile).into_iter().map(Into::into).collect()
}
