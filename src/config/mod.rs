//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `KARMA` prefix
//! and nested sections use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use karma_core::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod access;
mod error;
mod generation;
mod limits;
mod pricing;

pub use access::AccessConfig;
pub use error::{ConfigError, ValidationError};
pub use generation::GenerationConfig;
pub use limits::LimitsConfig;
pub use pricing::PricingConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Privileged user allow-list
    #[serde(default)]
    pub access: AccessConfig,

    /// Per-reading prices in credits
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Generation provider (Gemini) settings
    pub generation: GenerationConfig,

    /// Throttle window, daily reset offset, session expiry
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads `.env` if present, then reads variables with the `KARMA`
    /// prefix, e.g. `KARMA__PRICING__ADVICE_PRICE=25` or
    /// `KARMA__GENERATION__API_KEY=...`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("KARMA").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.access.validate()?;
        self.generation.validate()?;
        self.limits.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("KARMA__GENERATION__API_KEY", "test-key");
    }

    fn clear_env() {
        env::remove_var("KARMA__GENERATION__API_KEY");
        env::remove_var("KARMA__ACCESS__ADMIN_IDS");
        env::remove_var("KARMA__PRICING__ADVICE_PRICE");
        env::remove_var("KARMA__LIMITS__THROTTLE_WINDOW_SECS");
    }

    #[test]
    fn loads_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("load should succeed");
        assert!(config.validate().is_ok());
        assert_eq!(config.pricing.advice_price, 25);
        assert_eq!(config.limits.throttle_window_secs, 3);
        assert!(config.access.privileged_ids().unwrap().is_empty());
    }

    #[test]
    fn reads_overrides_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("KARMA__ACCESS__ADMIN_IDS", "469764985, 42");
        env::set_var("KARMA__PRICING__ADVICE_PRICE", "50");
        env::set_var("KARMA__LIMITS__THROTTLE_WINDOW_SECS", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("load should succeed");
        assert_eq!(config.pricing.advice_price, 50);
        assert_eq!(config.limits.throttle_window_secs, 5);
        assert_eq!(config.access.privileged_ids().unwrap().len(), 2);
    }
}
