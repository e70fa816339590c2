//! Lazily constructed, shared provider handle
//!
//! The API key is read from the environment on first use rather than at
//! startup, so the server (and `/health`) runs without credentials and each
//! relay request reports the missing key on its own. Once a handle has been
//! built it is reused for the life of the process.

use crate::core::config::Config;
use crate::core::constants::env;
use crate::core::error::RelayError;
use crate::core::provider::Provider;
use crate::core::providers::AnthropicProvider;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Lookup function for environment-style variables
pub type KeyLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Owns the process-wide provider handle
pub struct ClientManager {
    config: Arc<Config>,
    lookup: KeyLookup,
    handle: OnceCell<Arc<dyn Provider>>,
}

impl ClientManager {
    /// Manager reading credentials from the process environment
    pub fn from_env(config: Arc<Config>) -> Self {
        Self::with_lookup(config, Arc::new(|name: &str| std::env::var(name).ok()))
    }

    /// Manager reading credentials through `lookup`
    pub fn with_lookup(config: Arc<Config>, lookup: KeyLookup) -> Self {
        Self {
            config,
            lookup,
            handle: OnceCell::new(),
        }
    }

    /// Manager that already holds `provider`; no credentials are read
    #[cfg(test)]
    pub fn preloaded(config: Arc<Config>, provider: Arc<dyn Provider>) -> Self {
        Self {
            config,
            lookup: Arc::new(|_: &str| None),
            handle: OnceCell::new_with(Some(provider)),
        }
    }

    /// Resolve the API key, primary variable first
    ///
    /// Empty values are treated as unset.
    pub fn resolve_api_key(&self) -> Result<String, RelayError> {
        [env::PRIMARY_API_KEY, env::FALLBACK_API_KEY]
            .into_iter()
            .find_map(|name| (self.lookup)(name).filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                RelayError::Configuration(format!(
                    "{} or {} environment variable not set",
                    env::PRIMARY_API_KEY,
                    env::FALLBACK_API_KEY
                ))
            })
    }

    /// Return the cached handle, building it on first call
    ///
    /// Concurrent first calls build the handle once. A failed build leaves
    /// nothing cached, so the next call looks the key up again.
    pub async fn get_client(&self) -> Result<Arc<dyn Provider>, RelayError> {
        let handle = self
            .handle
            .get_or_try_init(|| async {
                debug!("Initializing Anthropic client");
                let api_key = self.resolve_api_key()?;
                let provider = AnthropicProvider::new(
                    api_key,
                    self.config.base_url.clone(),
                    self.config.anthropic_version.clone(),
                    self.config.request_timeout,
                )?;
                info!(
                    "{} client initialized for {}",
                    provider.provider_name(),
                    self.config.base_url
                );
                Ok::<Arc<dyn Provider>, RelayError>(Arc::new(provider))
            })
            .await?;
        Ok(handle.clone())
    }

    /// Whether a handle has been built yet
    #[cfg(test)]
    pub fn is_initialized(&self) -> bool {
        self.handle.initialized()
    }
}
