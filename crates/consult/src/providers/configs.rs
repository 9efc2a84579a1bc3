// Unified enum to wrap different provider configurations
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Ollama(OllamaProviderConfig),
}

#[derive(Debug, Clone)]
pub struct OllamaProviderConfig {
    pub host: String,
}

impl Default for OllamaProviderConfig {
    fn default() -> Self {
        Self {
            host: crate::providers::ollama::OLLAMA_HOST.to_string(),
        }
    }
}
