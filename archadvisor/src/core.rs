//! Configuration and errors shared by the library and the CLI.
//! Everything here is read once at startup and never reloaded.

use std::collections::HashMap;
use std::time::Duration;

use crate::ai::huggingface::{DEFAULT_HF_URL, REQUEST_TIMEOUT_SECS};
use crate::ai::provider::ProviderKind;

pub const HF_URL_VAR: &str = "ARCHADVISOR_HF_URL";
pub const PACE_VAR: &str = "ARCHADVISOR_PACE_MS";
pub const DEFAULT_PACE_MS: u64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Which providers have a credential configured.
///
/// Secrets are opaque: the only thing the router asks is whether one is
/// present, and the wired client receives the raw value unexamined.
#[derive(Clone, Default)]
pub struct CredentialSet {
    secrets: HashMap<ProviderKind, String>,
}

impl CredentialSet {
    /// Build from an arbitrary variable lookup. Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secrets = ProviderKind::PRIORITY
            .iter()
            .filter_map(|kind| {
                lookup(kind.env_var())
                    .filter(|value| !value.is_empty())
                    .map(|value| (*kind, value))
            })
            .collect();
        Self { secrets }
    }

    pub fn is_present(&self, kind: ProviderKind) -> bool {
        self.secrets.contains_key(&kind)
    }

    /// Present providers in routing priority order
    pub fn present(&self) -> Vec<ProviderKind> {
        ProviderKind::PRIORITY
            .iter()
            .copied()
            .filter(|kind| self.is_present(*kind))
            .collect()
    }

    pub(crate) fn secret(&self, kind: ProviderKind) -> Option<&str> {
        self.secrets.get(&kind).map(String::as_str)
    }
}

impl std::fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSet")
            .field("present", &self.present())
            .finish()
    }
}

/// Runtime options for the advisor (CLI or embedding application).
#[derive(Clone, Debug)]
pub struct AdvisorConfig {
    pub credentials: CredentialSet,
    pub huggingface_url: String,
    pub request_timeout: Duration,
    /// Delay between replayed tokens
    pub render_pace: Duration,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            credentials: CredentialSet::default(),
            huggingface_url: DEFAULT_HF_URL.to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            render_pace: Duration::from_millis(DEFAULT_PACE_MS),
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Result<Self, AdvisorError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdvisorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            credentials: CredentialSet::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(url) = lookup(HF_URL_VAR).filter(|u| !u.is_empty()) {
            config.huggingface_url = url;
        }

        if let Some(raw) = lookup(PACE_VAR) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                AdvisorError::Config(format!("{} must be a whole number of milliseconds, got {:?}", PACE_VAR, raw))
            })?;
            config.render_pace = Duration::from_millis(millis);
        }

        Ok(config)
    }
}
