//! Provider Router
//!
//! Tries configured providers in a fixed priority order and degrades to the
//! rule-based fallback report when none of them answers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ai::fallback::{fallback, FALLBACK_LABEL};
use crate::ai::huggingface::HuggingFaceClient;
use crate::ai::prompts::build_architecture_prompt;
use crate::ai::provider::{AIProvider, ProviderKind, ProviderResponse, ProviderStatus};
use crate::core::{AdvisorConfig, CredentialSet};

/// Router over the fixed provider priority list
pub struct ProviderRouter {
    credentials: CredentialSet,
    providers: HashMap<ProviderKind, Arc<dyn AIProvider>>,
}

impl ProviderRouter {
    /// Create a router with no call implementations wired
    pub fn new(credentials: CredentialSet) -> Self {
        Self {
            credentials,
            providers: HashMap::new(),
        }
    }

    /// Create a router with the Hugging Face client wired when its key is present.
    ///
    /// OpenAI, Anthropic and DeepSeek have no call path: a credential for
    /// them makes them candidates that are always skipped.
    pub fn from_config(config: &AdvisorConfig) -> Self {
        let mut router = Self::new(config.credentials.clone());
        if let Some(key) = config.credentials.secret(ProviderKind::HuggingFace) {
            let client = HuggingFaceClient::with_timeout(key.to_string(), config.request_timeout)
                .with_url(config.huggingface_url.clone());
            router
                .providers
                .insert(ProviderKind::HuggingFace, Arc::new(client));
        }
        router
    }

    /// Register a call implementation for a provider slot
    pub fn with_provider(mut self, kind: ProviderKind, provider: Arc<dyn AIProvider>) -> Self {
        self.providers.insert(kind, provider);
        self
    }

    /// Providers whose credential is present, in priority order
    pub fn candidates(&self) -> Vec<ProviderKind> {
        self.credentials.present()
    }

    /// Answer `user_input`. Never fails: total failure yields the fallback report.
    pub async fn route(&self, user_input: &str) -> ProviderResponse {
        let prompt = build_architecture_prompt(user_input);

        for kind in self.candidates() {
            let Some(provider) = self.providers.get(&kind) else {
                tracing::debug!("No call path for provider {}, skipping", kind);
                continue;
            };

            match provider.generate(&prompt).await {
                Ok(text) => {
                    tracing::info!("Using AI provider: {}", provider.name());
                    return ProviderResponse {
                        text,
                        source_label: kind.label().to_string(),
                    };
                }
                Err(e) => {
                    tracing::warn!("Provider {} failed: {}", kind, e);
                }
            }
        }

        tracing::info!("No provider answered, using rule-based fallback");
        ProviderResponse {
            text: fallback(user_input),
            source_label: FALLBACK_LABEL.to_string(),
        }
    }

    /// Get the status of all providers
    pub fn status(&self) -> Vec<ProviderStatus> {
        ProviderKind::PRIORITY
            .iter()
            .map(|kind| {
                let provider = self.providers.get(kind);
                ProviderStatus {
                    kind: *kind,
                    label: kind.label().to_string(),
                    env_var: kind.env_var().to_string(),
                    configured: self.credentials.is_present(*kind),
                    wired: provider.is_some(),
                    model: provider.map(|p| p.model_info()),
                }
            })
            .collect()
    }
}
