//! Error types and handling for the `Skywatch` engine

use thiserror::Error;

/// Main error type for the `Skywatch` engine
#[derive(Error, Debug)]
pub enum SkywatchError {
    /// A monitoring point, aircraft or task referenced by id does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// External weather provider unreachable or returned garbage
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Grid or projection generation produced an unusable result
    #[error("Computation error: {message}")]
    Computation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Storage collaborator errors
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl SkywatchError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new computation error
    pub fn computation<S: Into<String>>(message: S) -> Self {
        Self::Computation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether the error is meant to reach the caller unchanged.
    ///
    /// Upstream and computation failures are absorbed by fallback chains and
    /// never leave the engine.
    #[must_use]
    pub fn is_client_visible(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Validation { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkywatchError::NotFound { message } => format!("Resource not found: {message}"),
            SkywatchError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            SkywatchError::Upstream { .. } => {
                "Weather provider is unavailable. Showing the latest known conditions.".to_string()
            }
            SkywatchError::Computation { .. } => {
                "Risk computation failed. A simplified estimate is shown.".to_string()
            }
            SkywatchError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            SkywatchError::Storage { .. } => {
                "Storage operation failed. Please try again later.".to_string()
            }
        }
    }
}
