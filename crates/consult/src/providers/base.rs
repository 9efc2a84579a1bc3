use async_trait::async_trait;

use crate::errors::ProviderError;

/// Base trait for completion backends (Ollama today, mock in tests).
///
/// The backend is an opaque text-completion service: it takes a model
/// identifier and a fully constructed prompt and returns generated text.
/// Prompt construction lives with the agent, not here.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for the prompt using the specified model
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;
}
