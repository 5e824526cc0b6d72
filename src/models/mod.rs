//! Domain models for the suitability engine
//!
//! - Observation: weather snapshot for a monitoring point
//! - Threshold: aircraft operating limits
//! - Monitoring point: tracked area and its bounding box
//! - Suitability: factors, scores and projections
//! - Records: history, indicator and vertical profile rows

pub mod monitoring_point;
pub mod observation;
pub mod records;
pub mod suitability;
pub mod threshold;

pub use monitoring_point::{BoundingBox, DEFAULT_BOUNDS, MonitoringPoint};
pub use observation::{
    DataSource, Observation, PROVIDER_QUALITY, RawWeather, SYNTHETIC_QUALITY, StabilityIndex,
    WindShearLevel, WindUnit,
};
pub use records::{CoreIndicator, SuitabilityRecord, VerticalProfileLayer};
pub use suitability::{
    Factor, FactorResult, Recommendation, SuitabilitySnapshot, TimePointProjection,
};
pub use threshold::{DEFAULT_AIRCRAFT_ID, ThresholdProfile, TurbulenceLevel};
