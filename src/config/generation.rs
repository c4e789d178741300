//! Generation provider configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Generation provider (Gemini) settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// API key for the generation provider
    pub api_key: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client timeout in seconds; a timed-out call counts as a failed
    /// generation and triggers the refund path
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl GenerationConfig {
    /// Validate generation configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingRequired("GENERATION_API_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}
