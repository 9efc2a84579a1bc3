use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::base::CompletionProvider;
use super::configs::OllamaProviderConfig;
use crate::errors::ProviderError;

pub const OLLAMA_HOST: &str = "http://localhost:11434";
pub const OLLAMA_MODEL: &str = "llama3.2:latest";

pub struct OllamaProvider {
    client: Client,
    config: OllamaProviderConfig,
}

impl OllamaProvider {
    pub fn new(config: OllamaProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        Ok(Self { client, config })
    }

    async fn post(&self, payload: Value) -> Result<Value, ProviderError> {
        let url = format!("{}/api/generate", self.config.host.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedResponse(e.to_string())),
            status => Err(ProviderError::Status(status.as_u16())),
        }
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let payload = json!({
            "model": model,
            "prompt": prompt,
            "stream": false
        });

        let data = self.post(payload).await?;

        data.get("response")
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("missing `response` field".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_mock_server(response_body: Value) -> (MockServer, OllamaProvider) {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body))
            .mount(&mock_server)
            .await;

        // Point the provider at the mock server instead of a local Ollama
        let config = OllamaProviderConfig {
            host: mock_server.uri(),
        };

        let provider = OllamaProvider::new(config).unwrap();
        (mock_server, provider)
    }

    #[tokio::test]
    async fn test_complete_basic() {
        let response_body = json!({
            "model": OLLAMA_MODEL,
            "response": "Here is the analysis you asked for.",
            "done": true
        });

        let (_server, provider) = setup_mock_server(response_body).await;

        let text = provider
            .complete(OLLAMA_MODEL, "Analyze the market")
            .await
            .unwrap();

        assert_eq!(text, "Here is the analysis you asked for.");
    }

    #[tokio::test]
    async fn test_request_shape() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({
                "model": "llama3.2:latest",
                "prompt": "hello",
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "hi"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OllamaProvider::new(OllamaProviderConfig {
            host: mock_server.uri(),
        })
        .unwrap();

        let text = provider.complete("llama3.2:latest", "hello").await.unwrap();
        assert_eq!(text, "hi");
    }

    #[tokio::test]
    async fn test_missing_response_field() {
        let (_server, provider) = setup_mock_server(json!({"done": true})).await;

        let result = provider.complete(OLLAMA_MODEL, "hello").await;
        assert!(matches!(result, Err(ProviderError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let provider = OllamaProvider::new(OllamaProviderConfig {
            host: mock_server.uri(),
        })
        .unwrap();

        let result = provider.complete(OLLAMA_MODEL, "hello").await;
        assert_eq!(result, Err(ProviderError::Status(500)));
    }
}
