//! Anthropic Messages API provider

use crate::core::constants::header;
use crate::core::provider::{Provider, ProviderError};
use crate::models::anthropic::{ApiErrorBody, MessagesRequest, MessagesResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Provider talking to `POST {base_url}/v1/messages`
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    api_version: String,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    /// * `base_url` - API base URL without the `/v1` suffix
    /// * `api_version` - Value sent as `anthropic-version`
    /// * `timeout` - Request timeout in seconds
    pub fn new(
        api_key: String,
        base_url: String,
        api_version: String,
        timeout: u64,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|e| ProviderError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version,
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    /// Turn a non-success response body into a typed error
    ///
    /// The error `type` from the body decides the variant. Bodies that are
    /// not the documented envelope fall back to classifying by status.
    pub fn parse_error(status: u16, body: &str) -> ProviderError {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(envelope) => {
                ProviderError::from_api(status, &envelope.error.error_type, envelope.error.message)
            }
            Err(_) if status == 404 => ProviderError::NotFound(body.to_string()),
            Err(_) => ProviderError::from_api(status, "", body.to_string()),
        }
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn create_message(
        &self,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, ProviderError> {
        debug!("POST {} model={}", self.messages_url(), request.model);

        let response = self
            .client
            .post(self.messages_url())
            .header(header::API_KEY, &self.api_key)
            .header(header::ANTHROPIC_VERSION, &self.api_version)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let err = Self::parse_error(status.as_u16(), &error_text);
            if !err.is_model_not_found() {
                error!("Anthropic API returned {}: {}", status, error_text);
            }
            return Err(err);
        }

        response
            .json::<MessagesResponse>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }

    fn provider_name(&self) -> &str {
        "Anthropic"
    }
}
