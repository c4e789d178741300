//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Admin id list contains a non-numeric entry: {0}")]
    InvalidAdminId(String),

    #[error("Throttle window must be positive")]
    InvalidThrottleWindow,

    #[error("Daily reset offset out of range (must be within one day)")]
    InvalidDailyResetOffset,

    #[error("Generation timeout must be positive")]
    InvalidTimeout,
}
