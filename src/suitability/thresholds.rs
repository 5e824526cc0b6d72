use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::ThresholdProfile;
use crate::store::ThresholdStore;

/// Where a resolved profile came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    AircraftProfile,
    Default,
}

/// Resolves aircraft limits, falling back to the built-in profile
#[derive(Clone)]
pub struct ThresholdProvider {
    store: Arc<dyn ThresholdStore>,
}

impl ThresholdProvider {
    pub fn new(store: Arc<dyn ThresholdStore>) -> Self {
        Self { store }
    }

    /// Never fails: unknown aircraft and store errors both yield the default profile
    pub async fn profile(&self, aircraft_id: &str) -> ThresholdProfile {
        self.resolve(aircraft_id).await.0
    }

    /// Profile together with whether it was stored or the built-in default
    pub async fn resolve(&self, aircraft_id: &str) -> (ThresholdProfile, ThresholdSource) {
        match self.store.by_aircraft(aircraft_id).await {
            Ok(Some(profile)) => (profile, ThresholdSource::AircraftProfile),
            Ok(None) => {
                debug!("No threshold profile for aircraft {aircraft_id}, using default");
                (ThresholdProfile::default(), ThresholdSource::Default)
            }
            Err(e) => {
                warn!("Threshold lookup for aircraft {aircraft_id} failed: {e}");
                (ThresholdProfile::default(), ThresholdSource::Default)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use crate::{Result, SkywatchError};
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl ThresholdStore for BrokenStore {
        async fn by_aircraft(&self, _aircraft_id: &str) -> Result<Option<ThresholdProfile>> {
            Err(SkywatchError::storage("disk on fire"))
        }
    }

    #[tokio::test]
    async fn test_stored_profile_is_used() {
        let store = Arc::new(InMemoryStore::new());
        store
            .put_threshold(ThresholdProfile {
                aircraft_id: "a7".to_string(),
                max_wind_speed: 9.0,
                ..ThresholdProfile::default()
            })
            .await;
        let provider = ThresholdProvider::new(store);
        assert_eq!(provider.profile("a7").await.max_wind_speed, 9.0);
        assert_eq!(provider.profile("a8").await.max_wind_speed, 12.0);
    }

    #[tokio::test]
    async fn test_store_failure_yields_default() {
        let provider = ThresholdProvider::new(Arc::new(BrokenStore));
        assert_eq!(provider.profile("a1").await, ThresholdProfile::default());
        assert_eq!(provider.resolve("a1").await.1, ThresholdSource::Default);
    }

    #[tokio::test]
    async fn test_stored_profile_named_default_is_not_builtin() {
        let store = Arc::new(InMemoryStore::new());
        store
            .put_threshold(ThresholdProfile {
                max_wind_speed: 6.0,
                ..ThresholdProfile::default()
            })
            .await;
        let (profile, source) = ThresholdProvider::new(store).resolve("default").await;
        assert_eq!(profile.max_wind_speed, 6.0);
        assert_eq!(source, ThresholdSource::AircraftProfile);
    }
}
