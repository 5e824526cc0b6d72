//! Latest-observation resolution with provider refresh and fallbacks

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::models::{DataSource, Observation, PROVIDER_QUALITY};
use crate::store::{MonitoringPointDirectory, ObservationStore};
use crate::weather::WeatherProvider;
use crate::{Result, SkywatchError};

/// How the returned observation was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationOrigin {
    /// Stored record within the freshness window
    Fresh,
    /// Just fetched from the provider
    Refreshed,
    /// Stored record past the freshness window; the provider failed
    Stale,
    /// Built-in default conditions; nothing else was available
    Synthetic,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedObservation {
    pub observation: Observation,
    pub origin: ObservationOrigin,
}

#[derive(Clone)]
pub struct ObservationResolver {
    observations: Arc<dyn ObservationStore>,
    directory: Arc<dyn MonitoringPointDirectory>,
    provider: Arc<dyn WeatherProvider>,
    max_age: chrono::Duration,
    provider_timeout: Duration,
}

impl ObservationResolver {
    pub fn new(
        observations: Arc<dyn ObservationStore>,
        directory: Arc<dyn MonitoringPointDirectory>,
        provider: Arc<dyn WeatherProvider>,
        max_age: chrono::Duration,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            observations,
            directory,
            provider,
            max_age,
            provider_timeout,
        }
    }

    /// Latest usable observation for a point. Never fails.
    pub async fn latest(&self, point_id: &str) -> ResolvedObservation {
        self.latest_at(point_id, Utc::now()).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn latest_at(&self, point_id: &str, now: DateTime<Utc>) -> ResolvedObservation {
        let stored = match self.observations.latest(point_id).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Reading stored observation for {point_id} failed: {e}");
                None
            }
        };

        if let Some(observation) = &stored {
            if observation.age(now) <= self.max_age {
                debug!("Using fresh stored observation for {point_id}");
                return ResolvedObservation {
                    observation: observation.clone(),
                    origin: ObservationOrigin::Fresh,
                };
            }
        }

        match self.refresh(point_id, now).await {
            Ok(observation) => ResolvedObservation {
                observation,
                origin: ObservationOrigin::Refreshed,
            },
            Err(e) => {
                warn!("Weather refresh for {point_id} failed: {e}");
                match stored {
                    Some(observation) => ResolvedObservation {
                        observation,
                        origin: ObservationOrigin::Stale,
                    },
                    None => {
                        info!("No observation available for {point_id}, using synthetic defaults");
                        ResolvedObservation {
                            observation: Observation::synthetic(point_id, now),
                            origin: ObservationOrigin::Synthetic,
                        }
                    }
                }
            }
        }
    }

    async fn refresh(&self, point_id: &str, now: DateTime<Utc>) -> Result<Observation> {
        let point = self.directory.by_id(point_id).await?;
        let raw = tokio::time::timeout(
            self.provider_timeout,
            self.provider.fetch(point.longitude, point.latitude),
        )
        .await
        .map_err(|_| {
            SkywatchError::upstream(format!(
                "{} did not answer within {:?}",
                self.provider.name(),
                self.provider_timeout
            ))
        })??;

        let observation = Observation::from_raw(
            point_id,
            now,
            raw,
            DataSource::ExternalProvider,
            PROVIDER_QUALITY,
        );
        if let Err(e) = self.observations.insert(observation.clone()).await {
            warn!("Persisting refreshed observation for {point_id} failed: {e}");
        }
        Ok(observation)
    }
}
