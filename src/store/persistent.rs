use anyhow::Context;
use async_trait::async_trait;
use fjall::Keyspace;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use tokio::task;

use super::{MonitoringPointDirectory, ObservationStore, ThresholdStore};
use crate::models::{MonitoringPoint, Observation, ThresholdProfile};
use crate::{Result, SkywatchError};

/// Disk-backed store for observations, threshold profiles and monitoring points
pub struct PersistentStore {
    store: Keyspace,
}

fn latest_key(point_id: &str) -> String {
    format!("obs:latest:{point_id}")
}

fn observation_key(observation: &Observation) -> String {
    format!(
        "obs:{}:{:020}",
        observation.point_id,
        observation.observed_at.timestamp_millis()
    )
}

fn get_from_store(store: &Keyspace, key: &[u8]) -> anyhow::Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

fn storage_error(err: anyhow::Error) -> SkywatchError {
    SkywatchError::storage(format!("{err:#}"))
}

impl PersistentStore {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let db = fjall::Database::builder(path)
            .open()
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        let items = db.keyspace("skywatch", fjall::KeyspaceCreateOptions::default)?;
        Ok(PersistentStore { store: items })
    }

    #[tracing::instrument(name = "store_put", level = "debug", skip(self, value))]
    async fn put<T: Serialize + Send + Debug + 'static>(
        &self,
        key: String,
        value: T,
    ) -> anyhow::Result<()> {
        let store = self.store.clone();
        let bytes = postcard::to_stdvec(&value)?;
        task::spawn_blocking(move || store.insert(key.into_bytes(), bytes)).await??;
        Ok(())
    }

    #[tracing::instrument(name = "store_get", level = "debug", skip(self))]
    async fn get<T: DeserializeOwned + Send + 'static>(
        &self,
        key: String,
    ) -> anyhow::Result<Option<T>> {
        let store = self.store.clone();
        let maybe_bytes =
            task::spawn_blocking(move || get_from_store(&store, key.as_bytes())).await??;

        match maybe_bytes {
            Some(bytes) => Ok(Some(postcard::from_bytes(&bytes)?)),
            None => {
                tracing::debug!("Key not found");
                Ok(None)
            }
        }
    }

    pub async fn put_threshold(&self, profile: ThresholdProfile) -> Result<()> {
        self.put(format!("threshold:{}", profile.aircraft_id), profile)
            .await
            .map_err(storage_error)
    }

    pub async fn add_point(&self, point: MonitoringPoint) -> Result<()> {
        self.put(format!("point:{}", point.id), point)
            .await
            .map_err(storage_error)
    }
}

#[async_trait]
impl ObservationStore for PersistentStore {
    async fn latest(&self, point_id: &str) -> Result<Option<Observation>> {
        self.get(latest_key(point_id)).await.map_err(storage_error)
    }

    async fn insert(&self, observation: Observation) -> Result<String> {
        let id = observation_key(&observation);
        let current: Option<Observation> = self
            .get(latest_key(&observation.point_id))
            .await
            .map_err(storage_error)?;

        self.put(id.clone(), observation.clone())
            .await
            .map_err(storage_error)?;
        if current.is_none_or(|existing| existing.observed_at <= observation.observed_at) {
            self.put(latest_key(&observation.point_id), observation)
                .await
                .map_err(storage_error)?;
        }
        Ok(id)
    }
}

#[async_trait]
impl ThresholdStore for PersistentStore {
    async fn by_aircraft(&self, aircraft_id: &str) -> Result<Option<ThresholdProfile>> {
        self.get(format!("threshold:{aircraft_id}"))
            .await
            .map_err(storage_error)
    }
}

#[async_trait]
impl MonitoringPointDirectory for PersistentStore {
    async fn by_id(&self, point_id: &str) -> Result<MonitoringPoint> {
        self.get(format!("point:{point_id}"))
            .await
            .map_err(storage_error)?
            .ok_or_else(|| SkywatchError::not_found(format!("monitoring point {point_id}")))
    }
}
