//! Collaborator traits for everything the engine reads or writes
//!
//! The engine never owns entity storage. It talks to these traits, and the
//! crate ships two backends: [`memory::InMemoryStore`] implements all of them,
//! [`persistent::PersistentStore`] keeps observations, thresholds and points
//! on disk.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::Result;
use crate::models::{
    CoreIndicator, Factor, MonitoringPoint, Observation, SuitabilityRecord, ThresholdProfile,
    VerticalProfileLayer,
};

pub mod memory;
pub mod persistent;

pub use memory::InMemoryStore;
pub use persistent::PersistentStore;

#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Most recent observation of a point, if any
    async fn latest(&self, point_id: &str) -> Result<Option<Observation>>;
    /// Store an observation and return its id
    async fn insert(&self, observation: Observation) -> Result<String>;
}

#[async_trait]
pub trait ThresholdStore: Send + Sync {
    async fn by_aircraft(&self, aircraft_id: &str) -> Result<Option<ThresholdProfile>>;
}

#[async_trait]
pub trait MonitoringPointDirectory: Send + Sync {
    /// Look up a point; unknown ids are `NotFound`
    async fn by_id(&self, point_id: &str) -> Result<MonitoringPoint>;
}

#[async_trait]
pub trait SuitabilityHistoryStore: Send + Sync {
    /// Delete every row of the point with a time point at or after `since`
    async fn delete_since(&self, point_id: &str, since: DateTime<Utc>) -> Result<usize>;

    /// Delete rows of the point with a time point inside `[from, to]`
    async fn delete_window(
        &self,
        point_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<usize>;

    async fn insert(&self, record: SuitabilityRecord) -> Result<()>;

    /// Replace the rows of `[from, to]` with `records`.
    ///
    /// Backends that can do this atomically should override it.
    async fn replace_window(
        &self,
        point_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        records: Vec<SuitabilityRecord>,
    ) -> Result<()> {
        self.delete_window(point_id, from, to).await?;
        for record in records {
            self.insert(record).await?;
        }
        Ok(())
    }

    /// Newest rows first, optionally limited to one factor
    async fn recent(&self, factor: Option<Factor>, limit: usize)
    -> Result<Vec<SuitabilityRecord>>;
}

#[async_trait]
pub trait CoreIndicatorStore: Send + Sync {
    /// Newest rows first, optionally limited to one point
    async fn recent(&self, point_id: Option<&str>, limit: usize) -> Result<Vec<CoreIndicator>>;
}

#[async_trait]
pub trait VerticalProfileStore: Send + Sync {
    /// Layers of the point with a data time at or after `since`
    async fn since(
        &self,
        point_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<VerticalProfileLayer>>;
}
