//! Risk grids: time × height charts, geographic grids and area time series.
//!
//! Every generator has a weather-independent fallback of the same shape;
//! the engine runs them through [`fallback::first_success`].

use serde::Serialize;

pub mod base;
pub mod chart;
pub mod fallback;
pub mod geo;

pub use base::RiskInputs;
pub use chart::{ChartGrid, Resolution, TimeAxis, TimeRange};
pub use fallback::{Resolved, Stage, first_success};
pub use geo::{AreaCell, AreaGrid, GeoGrid, GeoPoint};

/// Qualitative band of a geo risk value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    #[must_use]
    pub fn from_value(value: i64) -> Self {
        match value {
            v if v >= 80 => Self::High,
            v if v >= 60 => Self::Medium,
            v if v >= 40 => Self::Low,
            _ => Self::VeryLow,
        }
    }
}
