//! Configuration management for the `Skywatch` engine
//!
//! Handles loading configuration from files and environment variables
//! and validates every section before the engine is built.

use crate::SkywatchError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkywatchConfig {
    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Suitability and risk engine settings
    #[serde(default)]
    pub engine: EngineConfig,
    /// Storage backend configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Provider name (open-meteo or offline)
    #[serde(default = "default_weather_provider")]
    pub provider: String,
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_weather_max_retries")]
    pub max_retries: u32,
}

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Aircraft whose limits are used when a request names none
    #[serde(default = "default_aircraft_id")]
    pub default_aircraft_id: String,
    /// Point charted by the weather heatmap when a request names neither point nor bounds
    #[serde(default = "default_point_id")]
    pub default_point_id: String,
    /// Projection horizon used when a request names none
    #[serde(default = "default_total_hours")]
    pub default_total_hours: u32,
    /// Longest projection horizon a request may ask for
    #[serde(default = "default_max_total_hours")]
    pub max_total_hours: u32,
    /// Observations older than this trigger a provider refresh
    #[serde(default = "default_observation_max_age")]
    pub observation_max_age_minutes: u32,
    /// IANA time zone for chart labels and the day/night factor
    #[serde(default = "default_display_timezone")]
    pub display_timezone: String,
    /// Fixed seed for the heuristic random source; entropy when unset
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Maximum history rows returned by the suitability heatmap
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

/// Storage backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend name (memory or persistent)
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    /// Directory of the persistent keyspace
    #[serde(default = "default_storage_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_weather_provider() -> String {
    "open-meteo".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_weather_max_retries() -> u32 {
    2
}

fn default_aircraft_id() -> String {
    crate::models::DEFAULT_AIRCRAFT_ID.to_string()
}

fn default_point_id() -> String {
    "point-1".to_string()
}

fn default_total_hours() -> u32 {
    3
}

fn default_max_total_hours() -> u32 {
    72
}

fn default_observation_max_age() -> u32 {
    60
}

fn default_display_timezone() -> String {
    "Asia/Shanghai".to_string()
}

fn default_history_limit() -> usize {
    200
}

fn default_storage_backend() -> String {
    "memory".to_string()
}

fn default_storage_location() -> String {
    "~/.local/share/skywatch".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            provider: default_weather_provider(),
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_aircraft_id: default_aircraft_id(),
            default_point_id: default_point_id(),
            default_total_hours: default_total_hours(),
            max_total_hours: default_max_total_hours(),
            observation_max_age_minutes: default_observation_max_age(),
            display_timezone: default_display_timezone(),
            random_seed: None,
            history_limit: default_history_limit(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            location: default_storage_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl SkywatchConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SKYWATCH__ENGINE__MAX_TOTAL_HOURS=48 style overrides
        builder = builder.add_source(
            Environment::with_prefix("SKYWATCH")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SkywatchConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skywatch").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.provider.is_empty() {
            self.weather.provider = default_weather_provider();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.engine.default_aircraft_id.is_empty() {
            self.engine.default_aircraft_id = default_aircraft_id();
        }
        if self.engine.default_point_id.is_empty() {
            self.engine.default_point_id = default_point_id();
        }
        if self.engine.default_total_hours == 0 {
            self.engine.default_total_hours = default_total_hours();
        }
        if self.engine.max_total_hours == 0 {
            self.engine.max_total_hours = default_max_total_hours();
        }
        if self.engine.observation_max_age_minutes == 0 {
            self.engine.observation_max_age_minutes = default_observation_max_age();
        }
        if self.engine.display_timezone.is_empty() {
            self.engine.display_timezone = default_display_timezone();
        }
        if self.engine.history_limit == 0 {
            self.engine.history_limit = default_history_limit();
        }
        if self.storage.backend.is_empty() {
            self.storage.backend = default_storage_backend();
        }
        if self.storage.location.is_empty() {
            self.storage.location = default_storage_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                SkywatchError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.weather.max_retries > 10 {
            return Err(SkywatchError::config("Weather API max retries cannot exceed 10").into());
        }

        if self.engine.max_total_hours > 168 {
            return Err(SkywatchError::config(
                "Projection horizon cannot exceed 168 hours (1 week)",
            )
            .into());
        }

        if self.engine.default_total_hours > self.engine.max_total_hours {
            return Err(SkywatchError::config(format!(
                "Default projection horizon {} exceeds the maximum of {} hours",
                self.engine.default_total_hours, self.engine.max_total_hours
            ))
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SkywatchError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SkywatchError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_providers = ["open-meteo", "offline"];
        if !valid_providers.contains(&self.weather.provider.as_str()) {
            return Err(SkywatchError::config(format!(
                "Invalid weather provider '{}'. Must be one of: {}",
                self.weather.provider,
                valid_providers.join(", ")
            ))
            .into());
        }

        let valid_backends = ["memory", "persistent"];
        if !valid_backends.contains(&self.storage.backend.as_str()) {
            return Err(SkywatchError::config(format!(
                "Invalid storage backend '{}'. Must be one of: {}",
                self.storage.backend,
                valid_backends.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(SkywatchError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.engine.display_timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(SkywatchError::config(format!(
                "Unknown display time zone '{}'",
                self.engine.display_timezone
            ))
            .into());
        }

        Ok(())
    }

    /// Display time zone; falls back to UTC for names `validate` would reject
    #[must_use]
    pub fn display_timezone(&self) -> chrono_tz::Tz {
        self.engine
            .display_timezone
            .parse()
            .unwrap_or(chrono_tz::UTC)
    }

    /// Storage location with a leading `~` expanded to the home directory
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        match self.storage.location.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(rest)),
            None => PathBuf::from(&self.storage.location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SkywatchConfig::default();
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_seconds, 10);
        assert_eq!(config.engine.default_total_hours, 3);
        assert_eq!(config.engine.max_total_hours, 72);
        assert_eq!(config.engine.history_limit, 200);
        assert_eq!(config.engine.default_point_id, "point-1");
        assert_eq!(config.logging.level, "info");
        assert!(config.engine.random_seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = SkywatchConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = SkywatchConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_horizon() {
        let mut config = SkywatchConfig::default();
        config.engine.max_total_hours = 200;
        assert!(config.validate().is_err());

        let mut config = SkywatchConfig::default();
        config.engine.default_total_hours = 80;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_timezone() {
        let mut config = SkywatchConfig::default();
        config.engine.display_timezone = "Mars/Olympus".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("time zone"));

        config.engine.display_timezone = "Europe/Berlin".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.display_timezone(), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = SkywatchConfig::default();
        config.weather.base_url.clear();
        config.engine.max_total_hours = 0;
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.engine.max_total_hours, 72);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_missing_path_uses_defaults() {
        let path = std::env::temp_dir().join("skywatch-does-not-exist.toml");
        let config = SkywatchConfig::load_from_path(Some(path)).unwrap();
        assert_eq!(config.storage.backend, "memory");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "skywatch-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[engine]\nmax_total_hours = 24\nrandom_seed = 7\n\n[weather]\nprovider = \"offline\"\n",
        )
        .unwrap();
        let config = SkywatchConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.engine.max_total_hours, 24);
        assert_eq!(config.engine.random_seed, Some(7));
        assert_eq!(config.weather.provider, "offline");
        assert_eq!(config.weather.timeout_seconds, 10);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = SkywatchConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("skywatch"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
