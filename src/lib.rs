//! `Skywatch` - flight-weather suitability and risk assessment
//!
//! This library derives per-factor suitability, composite scores, projected
//! suitability series and risk heatmaps from monitoring-point weather and
//! aircraft operating limits, degrading gracefully when inputs are missing.

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod risk;
pub mod store;
pub mod suitability;
pub mod weather;

// Re-export core types for public API
pub use config::SkywatchConfig;
pub use engine::{Collaborators, SuitabilityEngine};
pub use error::SkywatchError;
pub use models::{
    BoundingBox, Factor, FactorResult, MonitoringPoint, Observation, Recommendation,
    SuitabilitySnapshot, ThresholdProfile,
};
pub use store::{InMemoryStore, PersistentStore};
pub use weather::WeatherProvider;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkywatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
