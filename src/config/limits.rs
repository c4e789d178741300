//! Throttle, daily-reset, and session-expiry limits

use serde::Deserialize;

use super::error::ValidationError;

/// Rate and expiry limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Per-user cooldown between triggers, in seconds
    #[serde(default = "default_throttle_window_secs")]
    pub throttle_window_secs: u64,

    /// Offset from UTC, in minutes, at which the free daily card resets.
    /// The default matches the bot's home deployment (UTC+2).
    #[serde(default = "default_daily_reset_offset")]
    pub daily_reset_utc_offset_minutes: i32,

    /// How long an opened reading session waits for the user's context
    /// before it is considered abandoned
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

fn default_throttle_window_secs() -> u64 {
    3
}

fn default_daily_reset_offset() -> i32 {
    120
}

fn default_session_ttl_secs() -> u64 {
    900
}

impl LimitsConfig {
    /// Validate limit configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.throttle_window_secs == 0 {
            return Err(ValidationError::InvalidThrottleWindow);
        }
        if self.daily_reset_utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ValidationError::InvalidDailyResetOffset);
        }
        Ok(())
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            throttle_window_secs: default_throttle_window_secs(),
            daily_reset_utc_offset_minutes: default_daily_reset_offset(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}
