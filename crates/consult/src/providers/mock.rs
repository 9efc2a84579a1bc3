use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::base::CompletionProvider;

/// A mock provider that returns pre-configured responses for testing
pub struct MockProvider {
    responses: Arc<Mutex<Vec<String>>>,
    failure: Option<ProviderError>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            failure: None,
        }
    }

    /// Create a mock provider that fails every call with the given error
    pub fn failing(error: ProviderError) -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: Some(error),
        }
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, _model: &str, _prompt: &str) -> Result<String, ProviderError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty text if no more pre-configured responses
            Ok(String::new())
        } else {
            Ok(responses.remove(0))
        }
    }
}
