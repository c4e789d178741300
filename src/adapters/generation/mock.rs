//! Mock generation provider for testing.
//!
//! Queue responses in order, inspect recorded requests afterwards. Lets
//! tests drive the fulfilled, empty-result, and provider-error paths
//! without a real API.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{GenerationError, GenerationProvider, GenerationRequest};

/// A configured mock response.
#[derive(Debug)]
enum MockResponse {
    Text(String),
    Error(GenerationError),
}

/// Mock generation provider.
///
/// Responses are consumed in FIFO order; when the queue runs dry the
/// provider answers with empty text, which callers treat as failure.
#[derive(Debug, Clone, Default)]
pub struct MockGenerationProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockGenerationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful text response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Text(content.into()));
        self
    }

    /// Queues an empty response (generation "succeeds" with no text).
    pub fn with_empty_response(self) -> Self {
        self.with_response("")
    }

    /// Queues a provider error.
    pub fn with_error(self, error: GenerationError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(request);

        match self.responses.lock().unwrap().pop_front() {
            Some(MockResponse::Text(text)) => Ok(text),
            Some(MockResponse::Error(error)) => Err(error),
            None => Ok(String::new()),
        }
    }
}
