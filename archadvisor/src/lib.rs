//! ArchAdvisor - software architecture advisor library
//!
//! Takes a free-text system description, guesses an architecture category
//! from keywords, asks an inference provider for a markdown review and falls
//! back to a rule-based report when no provider answers.
//!
//! # Quick Start
//!
//! ```no_run
//! use archadvisor::{AdvisorConfig, ProviderRouter, Session, SilentRenderer};
//!
//! # async fn run() -> Result<(), archadvisor::AdvisorError> {
//! let config = AdvisorConfig::from_env()?;
//! let router = ProviderRouter::from_config(&config);
//! let mut session = Session::new();
//!
//! let turn = session
//!     .submit("Design a real-time chat app", &router, &mut SilentRenderer, config.render_pace)
//!     .await?;
//! println!("{}", turn.content);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Keyword classifier**: first-match-wins rules over six categories
//! - **Provider routing**: fixed priority list filtered by configured credentials
//! - **Fallback report**: deterministic markdown when every provider fails
//! - **Session replay**: word-by-word rendering decoupled from the stored transcript

pub mod ai;
pub mod core;
pub mod render;
pub mod session;

// Re-export main types
pub use crate::core::{AdvisorConfig, AdvisorError, CredentialSet};
pub use ai::classifier::{classify, Category};
pub use ai::fallback::{fallback, FALLBACK_LABEL};
pub use ai::provider::{AIProvider, ProviderError, ProviderKind, ProviderResponse};
pub use ai::router::ProviderRouter;
pub use render::{Frame, Replay, SilentRenderer, TurnRenderer};
pub use session::{Role, Session, SessionState, Turn};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        classify, fallback, AdvisorConfig, AdvisorError, Category, ProviderResponse,
        ProviderRouter, Role, Session, Turn, TurnRenderer,
    };
}
