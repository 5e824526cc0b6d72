//! In-process store backing every collaborator trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::{
    CoreIndicatorStore, MonitoringPointDirectory, ObservationStore, SuitabilityHistoryStore,
    ThresholdStore, VerticalProfileStore,
};
use crate::models::{
    CoreIndicator, Factor, MonitoringPoint, Observation, SuitabilityRecord, ThresholdProfile,
    VerticalProfileLayer,
};
use crate::{Result, SkywatchError};

#[derive(Default)]
pub struct InMemoryStore {
    observations: RwLock<HashMap<String, Vec<Observation>>>,
    thresholds: RwLock<HashMap<String, ThresholdProfile>>,
    points: RwLock<HashMap<String, MonitoringPoint>>,
    history: RwLock<BTreeMap<HistoryKey, SuitabilityRecord>>,
    indicators: RwLock<Vec<CoreIndicator>>,
    profiles: RwLock<Vec<VerticalProfileLayer>>,
}

/// One history slot: a point's factor at a time point
type HistoryKey = (String, Factor, DateTime<Utc>);

fn upsert(rows: &mut BTreeMap<HistoryKey, SuitabilityRecord>, record: SuitabilityRecord) {
    let key = (record.point_id.clone(), record.factor, record.time_point);
    rows.insert(key, record);
}

/// Remove every row of the point with a time point inside `[from, to]`
fn remove_window(
    rows: &mut BTreeMap<HistoryKey, SuitabilityRecord>,
    point_id: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> usize {
    if from > to {
        return 0;
    }
    let mut removed = 0;
    for factor in Factor::ALL {
        let keys: Vec<HistoryKey> = rows
            .range((point_id.to_string(), factor, from)..=(point_id.to_string(), factor, to))
            .map(|(key, _)| key.clone())
            .collect();
        for key in keys {
            rows.remove(&key);
            removed += 1;
        }
    }
    removed
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_point(&self, point: MonitoringPoint) {
        self.points.write().await.insert(point.id.clone(), point);
    }

    pub async fn put_threshold(&self, profile: ThresholdProfile) {
        self.thresholds
            .write()
            .await
            .insert(profile.aircraft_id.clone(), profile);
    }

    pub async fn push_indicator(&self, indicator: CoreIndicator) {
        self.indicators.write().await.push(indicator);
    }

    pub async fn push_profile_layer(&self, layer: VerticalProfileLayer) {
        self.profiles.write().await.push(layer);
    }

    /// Number of stored observations for a point
    pub async fn observation_count(&self, point_id: &str) -> usize {
        self.observations
            .read()
            .await
            .get(point_id)
            .map_or(0, Vec::len)
    }

    /// History rows of one point in time point order
    pub async fn history_for(&self, point_id: &str) -> Vec<SuitabilityRecord> {
        let mut rows: Vec<SuitabilityRecord> = self
            .history
            .read()
            .await
            .values()
            .filter(|row| row.point_id == point_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.time_point, row.factor));
        rows
    }
}

#[async_trait]
impl ObservationStore for InMemoryStore {
    async fn latest(&self, point_id: &str) -> Result<Option<Observation>> {
        Ok(self
            .observations
            .read()
            .await
            .get(point_id)
            .and_then(|rows| rows.iter().max_by_key(|obs| obs.observed_at))
            .cloned())
    }

    async fn insert(&self, observation: Observation) -> Result<String> {
        let id = format!(
            "{}:{}",
            observation.point_id,
            observation.observed_at.timestamp_millis()
        );
        self.observations
            .write()
            .await
            .entry(observation.point_id.clone())
            .or_default()
            .push(observation);
        Ok(id)
    }
}

#[async_trait]
impl ThresholdStore for InMemoryStore {
    async fn by_aircraft(&self, aircraft_id: &str) -> Result<Option<ThresholdProfile>> {
        Ok(self.thresholds.read().await.get(aircraft_id).cloned())
    }
}

#[async_trait]
impl MonitoringPointDirectory for InMemoryStore {
    async fn by_id(&self, point_id: &str) -> Result<MonitoringPoint> {
        self.points
            .read()
            .await
            .get(point_id)
            .cloned()
            .ok_or_else(|| SkywatchError::not_found(format!("monitoring point {point_id}")))
    }
}

#[async_trait]
impl SuitabilityHistoryStore for InMemoryStore {
    async fn delete_since(&self, point_id: &str, since: DateTime<Utc>) -> Result<usize> {
        let mut rows = self.history.write().await;
        Ok(remove_window(&mut rows, point_id, since, DateTime::<Utc>::MAX_UTC))
    }

    async fn delete_window(
        &self,
        point_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<usize> {
        let mut rows = self.history.write().await;
        Ok(remove_window(&mut rows, point_id, from, to))
    }

    async fn insert(&self, record: SuitabilityRecord) -> Result<()> {
        upsert(&mut *self.history.write().await, record);
        Ok(())
    }

    async fn replace_window(
        &self,
        point_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        records: Vec<SuitabilityRecord>,
    ) -> Result<()> {
        let mut rows = self.history.write().await;
        remove_window(&mut rows, point_id, from, to);
        for record in records {
            upsert(&mut rows, record);
        }
        Ok(())
    }

    async fn recent(
        &self,
        factor: Option<Factor>,
        limit: usize,
    ) -> Result<Vec<SuitabilityRecord>> {
        let mut rows: Vec<SuitabilityRecord> = self
            .history
            .read()
            .await
            .values()
            .filter(|row| factor.is_none_or(|f| row.factor == f))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.time_point.cmp(&a.time_point))
        });
        rows.truncate(limit);
        Ok(rows)
    }
}

#[async_trait]
impl CoreIndicatorStore for InMemoryStore {
    async fn recent(&self, point_id: Option<&str>, limit: usize) -> Result<Vec<CoreIndicator>> {
        let mut rows: Vec<CoreIndicator> = self
            .indicators
            .read()
            .await
            .iter()
            .filter(|row| point_id.is_none_or(|id| row.point_id == id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.data_time.cmp(&a.data_time));
        rows.truncate(limit);
        Ok(rows)
    }
}

#[async_trait]
impl VerticalProfileStore for InMemoryStore {
    async fn since(
        &self,
        point_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<VerticalProfileLayer>> {
        Ok(self
            .profiles
            .read()
            .await
            .iter()
            .filter(|layer| layer.point_id == point_id && layer.data_time >= since)
            .cloned()
            .collect())
    }
}
