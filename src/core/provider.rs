//! Provider abstraction for the outbound "create message" call
//!
//! The relay depends only on this trait: a request carrying model, token cap,
//! tools and messages goes in, a stop reason plus content blocks come out.

use crate::core::constants::api_error;
use crate::models::anthropic::{MessagesRequest, MessagesResponse};
use async_trait::async_trait;
use thiserror::Error;

/// Error types for provider operations
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("not_found_error: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("API error (status {status}, {error_type}): {message}")]
    Api {
        status: u16,
        error_type: String,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Build an error from an HTTP status and the provider's error `type`
    pub fn from_api(status: u16, error_type: &str, message: String) -> Self {
        match (status, error_type) {
            (_, api_error::NOT_FOUND) => ProviderError::NotFound(message),
            (_, api_error::AUTHENTICATION) | (401, _) => ProviderError::Authentication(message),
            (_, api_error::RATE_LIMIT) | (429, _) => ProviderError::RateLimit(message),
            (_, api_error::INVALID_REQUEST) | (400, _) => ProviderError::BadRequest(message),
            _ => ProviderError::Api {
                status,
                error_type: error_type.to_string(),
                message,
            },
        }
    }

    /// Whether trying another model may succeed
    pub fn is_model_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }
}

/// Trait for LLM API providers
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send a non-streaming create-message request
    async fn create_message(
        &self,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, ProviderError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_classified_by_type() {
        let err = ProviderError::from_api(404, "not_found_error", "model: x".into());
        assert!(err.is_model_not_found());
        assert!(err.to_string().contains("not_found_error"));
    }

    #[test]
    fn test_other_errors_are_not_recoverable() {
        let cases = [
            ProviderError::from_api(401, "authentication_error", "bad key".into()),
            ProviderError::from_api(429, "rate_limit_error", "slow down".into()),
            ProviderError::from_api(400, "invalid_request_error", "bad".into()),
            ProviderError::from_api(529, "overloaded_error", "busy".into()),
            ProviderError::Transport("connection reset".into()),
        ];
        for err in cases {
            assert!(!err.is_model_not_found(), "{err}");
        }
    }

    #[test]
    fn test_status_fallback_classification() {
        assert!(matches!(
            ProviderError::from_api(401, "", String::new()),
            ProviderError::Authentication(_)
        ));
        assert!(matches!(
            ProviderError::from_api(529, "overloaded_error", String::new()),
            ProviderError::Api { status: 529, .. }
        ));
    }
}
