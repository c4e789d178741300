//! Generation provider port - the opaque prompt-to-text call.
//!
//! The core treats generated text as best-effort natural language with no
//! bit-exact format. A provider may fail or return empty; both are handled
//! identically by the charge orchestrator (refund path), and a provider
//! timeout is treated the same as an empty result.

use async_trait::async_trait;
use thiserror::Error;

/// Port for text generation.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generates text for the given request.
    ///
    /// An `Ok` result may still be empty or whitespace-only; callers must
    /// treat that as a failed generation.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}

/// One generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Persona/system instruction for the provider.
    pub system_prompt: String,
    /// The user-facing prompt.
    pub prompt: String,
    /// Optional voice message the provider should transcribe itself.
    pub attachment: Option<AudioAttachment>,
}

impl GenerationRequest {
    pub fn new(system_prompt: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            prompt: prompt.into(),
            attachment: None,
        }
    }

    /// Attaches a binary audio payload to the request.
    pub fn with_attachment(mut self, attachment: AudioAttachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// A binary audio payload, e.g. a downloaded voice message.
#[derive(Debug, Clone)]
pub struct AudioAttachment {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl AudioAttachment {
    /// An OGG voice message, the platform's native voice format.
    pub fn ogg(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime_type: "audio/ogg".to_string(),
        }
    }
}

/// Errors from generation provider operations.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The provider did not answer within its client timeout.
    #[error("generation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Network-level failure reaching the provider.
    #[error("generation network error: {0}")]
    Network(String),

    /// The provider answered with an error.
    #[error("generation provider error: {0}")]
    Provider(String),
}
