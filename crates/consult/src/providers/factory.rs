use std::sync::Arc;

use super::{base::CompletionProvider, configs::ProviderConfig, ollama::OllamaProvider};
use crate::errors::ProviderError;

pub fn get_provider(config: ProviderConfig) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    match config {
        ProviderConfig::Ollama(ollama_config) => Ok(Arc::new(OllamaProvider::new(ollama_config)?)),
    }
}
