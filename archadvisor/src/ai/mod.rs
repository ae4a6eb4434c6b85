pub mod classifier;
pub mod fallback;
pub mod huggingface;
pub mod prompts;
pub mod provider;
pub mod router;

// Re-export for convenience
pub use classifier::{classify, Category};
pub use fallback::{fallback, FALLBACK_LABEL};
pub use huggingface::HuggingFaceClient;
pub use prompts::build_architecture_prompt;
pub use provider::{AIProvider, ModelInfo, ProviderError, ProviderKind, ProviderResponse, ProviderStatus};
pub use router::ProviderRouter;
