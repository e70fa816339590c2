//! Relay error taxonomy
//!
//! Every variant ends up as an HTTP 500 with `{"detail": <Display>}`; the
//! variants exist so logs and tests can tell the failure kinds apart.

use crate::core::provider::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Missing credentials
    #[error("{0}")]
    Configuration(String),

    /// Every candidate model was reported as not found
    #[error("No Claude models available. Last error: {last_error}")]
    UpstreamUnavailable { last_error: ProviderError },

    /// Provider failure other than model-not-found
    #[error(transparent)]
    Upstream(#[from] ProviderError),

    /// Provider answered but not with a usable tool call
    #[error("{0}")]
    ResponseShape(String),
}

impl RelayError {
    /// Short variant name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Configuration(_) => "ConfigurationError",
            RelayError::UpstreamUnavailable { .. } => "UpstreamUnavailableError",
            RelayError::Upstream(_) => "UpstreamError",
            RelayError::ResponseShape(_) => "ResponseShapeError",
        }
    }
}
