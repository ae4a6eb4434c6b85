//! Hugging Face Inference API Client
//!
//! The one provider with a real call path. Posts the prompt to a
//! text-generation endpoint and returns the continuation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ai::provider::{AIProvider, ModelInfo, ProviderError};

pub const DEFAULT_HF_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2";
const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
pub const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_NEW_TOKENS: u32 = 600;
const TEMPERATURE: f32 = 0.4;

/// Client for the Hugging Face Inference API
pub struct HuggingFaceClient {
    client: Client,
    api_key: String,
    url: String,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

/// The endpoint answers with either one object or a list holding one object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Batch(Vec<Generation>),
    Single(Generation),
}

impl GenerationResponse {
    fn into_text(self) -> Result<String, ProviderError> {
        match self {
            GenerationResponse::Single(generation) => Ok(generation.generated_text),
            GenerationResponse::Batch(generations) => generations
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .ok_or_else(|| {
                    ProviderError::InvalidResponse("Empty generation list in response".to_string())
                }),
        }
    }
}

impl HuggingFaceClient {
    /// Create a new client for the default model endpoint
    pub fn new(api_key: String) -> Self {
        Self::with_timeout(api_key, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(api_key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            url: DEFAULT_HF_URL.to_string(),
        }
    }

    /// Set the endpoint URL
    pub fn with_url(mut self, url: String) -> Self {
        self.url = url;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send_request(&self, prompt: &str) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        let request = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
            },
        };

        tracing::debug!("Sending request to Hugging Face: {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: GenerationResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse JSON: {}", e)))?;

        parsed.into_text()
    }
}

/// Remove the prompt the endpoint echoes in front of its continuation.
fn strip_echoed_prompt(generated: &str, prompt: &str) -> String {
    generated
        .strip_prefix(prompt)
        .unwrap_or(generated)
        .trim()
        .to_string()
}

#[async_trait]
impl AIProvider for HuggingFaceClient {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let generated = self.send_request(prompt).await?;
        Ok(strip_echoed_prompt(&generated, prompt))
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            provider: "huggingface".to_string(),
            model_name: DEFAULT_MODEL.to_string(),
            endpoint: self.url().to_string(),
            max_new_tokens: MAX_NEW_TOKENS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_echoed_prompt() {
        assert_eq!(strip_echoed_prompt("PROMPT_TEXT answer body", "PROMPT_TEXT"), "answer body");
        assert_eq!(strip_echoed_prompt("  no echo here \n", "PROMPT_TEXT"), "no echo here");
    }

    #[test]
    fn test_response_shapes() {
        let single: GenerationResponse =
            serde_json::from_str(r#"{"generated_text": "one"}"#).unwrap();
        assert_eq!(single.into_text().unwrap(), "one");

        let batch: GenerationResponse =
            serde_json::from_str(r#"[{"generated_text": "two"}]"#).unwrap();
        assert_eq!(batch.into_text().unwrap(), "two");

        let empty: GenerationResponse = serde_json::from_str("[]").unwrap();
        assert!(matches!(empty.into_text(), Err(ProviderError::InvalidResponse(_))));

        assert!(serde_json::from_str::<GenerationResponse>(r#"{"error": "loading"}"#).is_err());
    }

    #[test]
    fn test_request_payload() {
        let request = GenerationRequest {
            inputs: "hi",
            parameters: GenerationParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["inputs"], "hi");
        assert_eq!(value["parameters"]["max_new_tokens"], 600);
        assert!((value["parameters"]["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_missing_key() {
        let client = HuggingFaceClient::new(String::new());
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey));
    }

    #[test]
    fn test_model_info() {
        let client = HuggingFaceClient::new("k".to_string()).with_url("http://localhost:1".to_string());
        let info = client.model_info();
        assert_eq!(info.endpoint, "http://localhost:1");
        assert_eq!(client.url(), info.endpoint);
        assert_eq!(info.max_new_tokens, 600);
        assert_eq!(client.name(), "huggingface");
    }
}
