//! Suitability assessment: threshold lookup, observation resolution,
//! factor evaluation, composite scoring and time projection.

pub mod factors;
pub mod observation;
pub mod projection;
pub mod random;
pub mod scoring;
pub mod thresholds;

pub use factors::{FactorReading, assess, evaluate};
pub use observation::{ObservationOrigin, ObservationResolver, ResolvedObservation};
pub use projection::project;
pub use random::{EntropySource, RandomSource, RngPolicy, ScriptedSource};
pub use scoring::score;
pub use thresholds::{ThresholdProvider, ThresholdSource};
