//! External weather providers

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::WeatherConfig;
use crate::models::RawWeather;
use crate::{Result, SkywatchError};

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

/// A source of current conditions at a coordinate. Calls may fail.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, longitude: f64, latitude: f64) -> Result<RawWeather>;

    fn name(&self) -> &'static str;
}

/// Provider returning a fixed reading, or always failing when built with [`StaticWeatherProvider::unavailable`]
#[derive(Debug, Clone, Default)]
pub struct StaticWeatherProvider {
    weather: Option<RawWeather>,
}

impl StaticWeatherProvider {
    #[must_use]
    pub fn new(weather: RawWeather) -> Self {
        Self {
            weather: Some(weather),
        }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self { weather: None }
    }
}

#[async_trait]
impl WeatherProvider for StaticWeatherProvider {
    async fn fetch(&self, _longitude: f64, _latitude: f64) -> Result<RawWeather> {
        self.weather
            .clone()
            .ok_or_else(|| SkywatchError::upstream("offline weather provider has no data"))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Build the provider named in the configuration
pub fn from_config(config: &WeatherConfig) -> Result<Arc<dyn WeatherProvider>> {
    match config.provider.as_str() {
        "open-meteo" => Ok(Arc::new(OpenMeteoProvider::new(config)?)),
        "offline" => Ok(Arc::new(StaticWeatherProvider::unavailable())),
        other => Err(SkywatchError::config(format!(
            "Unknown weather provider '{other}'"
        ))),
    }
}
