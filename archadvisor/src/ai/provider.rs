//! AI Provider Trait
//!
//! Defines a common interface for inference providers and the types the
//! router passes around.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    ParseError(String),
    #[error("Missing API key")]
    MissingApiKey,
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Providers known to the router, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    DeepSeek,
    HuggingFace,
}

impl ProviderKind {
    /// Fixed routing priority, highest first
    pub const PRIORITY: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::DeepSeek,
        ProviderKind::HuggingFace,
    ];

    /// Environment variable holding this provider's credential
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::DeepSeek => "DEEPSEEK_API_KEY",
            ProviderKind::HuggingFace => "HF_API_KEY",
        }
    }

    /// Label shown in the caption under an assistant turn
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Anthropic => "Anthropic",
            ProviderKind::DeepSeek => "DeepSeek",
            ProviderKind::HuggingFace => "Hugging Face",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Text produced for one turn and where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub text: String,
    pub source_label: String,
}

/// Information about an AI model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Provider name (e.g., "huggingface")
    pub provider: String,

    /// Model name (e.g., "mistralai/Mistral-7B-Instruct-v0.2")
    pub model_name: String,

    /// Endpoint the client posts to
    pub endpoint: String,

    /// Upper bound on generated tokens per call
    pub max_new_tokens: u32,
}

/// Common trait for all inference providers
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Generate a completion for `prompt`. One attempt, no retries.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Get model info
    fn model_info(&self) -> ModelInfo;
}

/// Per-provider routing status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub kind: ProviderKind,
    pub label: String,
    pub env_var: String,
    pub configured: bool,
    /// Whether the router has a call implementation for this provider
    pub wired: bool,
    pub model: Option<ModelInfo>,
}
