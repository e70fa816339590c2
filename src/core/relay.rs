//! Prompt relay with model fallback
//!
//! One prompt goes in, one element list (or one error) comes out. Candidate
//! models are tried strictly in order; only a model-not-found error moves on
//! to the next candidate, anything else ends the request.

use crate::conversion::request_builder::build_request;
use crate::conversion::response_extractor::extract_elements;
use crate::core::client::ClientManager;
use crate::core::config::Config;
use crate::core::error::RelayError;
use crate::core::provider::ProviderError;
use crate::models::diagram::DiagramElement;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns prompts into diagram elements via the provider
pub struct PromptRelay {
    clients: Arc<ClientManager>,
    candidates: Vec<String>,
    max_tokens: u32,
}

impl PromptRelay {
    pub fn new(config: &Config, clients: Arc<ClientManager>) -> Self {
        Self {
            clients,
            candidates: config.candidates.clone(),
            max_tokens: config.max_tokens,
        }
    }

    /// Candidate models in the order they are tried
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Run the fallback loop for one prompt
    ///
    /// # Errors
    ///
    /// - [`RelayError::Configuration`] if no API key is available
    /// - [`RelayError::Upstream`] on the first non-not-found provider error
    /// - [`RelayError::ResponseShape`] if a model answered without a usable
    ///   tool call
    /// - [`RelayError::UpstreamUnavailable`] if every candidate was not found
    pub async fn relay(&self, prompt: &str) -> Result<Vec<DiagramElement>, RelayError> {
        let provider = self.clients.get_client().await?;
        let mut last_error: Option<ProviderError> = None;

        for model in &self.candidates {
            info!("Trying model: {}", model);
            let request = build_request(model, prompt, self.max_tokens);

            match provider.create_message(&request).await {
                Ok(response) => {
                    info!(
                        "Success with model: {} (stop_reason={})",
                        model,
                        response.stop_reason.as_deref().unwrap_or("none")
                    );
                    let elements = extract_elements(&response)?;
                    info!("Got {} elements from tool call", elements.len());
                    return Ok(elements);
                }
                Err(e) if e.is_model_not_found() => {
                    warn!("Model {} not available, trying next...", model);
                    debug!("Model {} lookup failed: {}", model, e);
                    last_error = Some(e);
                }
                Err(e) => return Err(RelayError::Upstream(e)),
            }
        }

        Err(RelayError::UpstreamUnavailable {
            last_error: last_error.unwrap_or_else(|| {
                ProviderError::NotFound("no candidate models configured".to_string())
            }),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::constants::{role, stop};
    use crate::core::provider::Provider;
    use crate::models::anthropic::{ContentBlock, MessagesRequest, MessagesResponse};
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Provider answering from a per-model script and recording calls
    pub(crate) struct ScriptedProvider {
        script: HashMap<String, Result<MessagesResponse, ProviderError>>,
        calls: Mutex<Vec<String>>,
        requests: Mutex<Vec<MessagesRequest>>,
    }

    impl ScriptedProvider {
        pub(crate) fn new(
            script: Vec<(&str, Result<MessagesResponse, ProviderError>)>,
        ) -> Self {
            Self {
                script: script
                    .into_iter()
                    .map(|(model, outcome)| (model.to_string(), outcome))
                    .collect(),
                calls: Mutex::new(Vec::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn last_request(&self) -> Option<MessagesRequest> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        async fn create_message(
            &self,
            request: &MessagesRequest,
        ) -> Result<MessagesResponse, ProviderError> {
            self.calls.lock().unwrap().push(request.model.clone());
            self.requests.lock().unwrap().push(request.clone());
            self.script
                .get(&request.model)
                .cloned()
                .unwrap_or_else(|| Err(ProviderError::NotFound(format!("model: {}", request.model))))
        }

        fn provider_name(&self) -> &str {
            "Scripted"
        }
    }

    pub(crate) fn tool_response(elements: Value) -> Result<MessagesResponse, ProviderError> {
        Ok(MessagesResponse {
            id: "msg_1".to_string(),
            model: String::new(),
            stop_reason: Some(stop::TOOL_USE.to_string()),
            content: vec![ContentBlock::ToolUse {
                id: "toolu_1".to_string(),
                name: "create_excalidraw_diagram".to_string(),
                input: json!({ "elements": elements }),
            }],
        })
    }

    pub(crate) fn not_found(model: &str) -> Result<MessagesResponse, ProviderError> {
        Err(ProviderError::NotFound(format!("model: {}", model)))
    }

    pub(crate) fn test_config() -> Config {
        Config {
            candidates: vec!["m1".to_string(), "m2".to_string(), "m3".to_string()],
            ..Config::default()
        }
    }

    fn relay_with(provider: Arc<ScriptedProvider>) -> PromptRelay {
        let config = test_config();
        let clients = Arc::new(ClientManager::preloaded(Arc::new(config.clone()), provider));
        PromptRelay::new(&config, clients)
    }

    #[tokio::test]
    async fn test_first_candidate_success_returns_elements_unmodified() {
        let elements = json!([{"type": "cameraUpdate", "width": 800}, {"type": "rectangle", "id": "r1"}]);
        let provider = Arc::new(ScriptedProvider::new(vec![("m1", tool_response(elements.clone()))]));
        let relay = relay_with(provider.clone());

        let result = relay.relay("a cache").await.unwrap();

        assert_eq!(Value::Array(result), elements);
        assert_eq!(provider.calls(), vec!["m1"]);

        let request = provider.last_request().unwrap();
        assert_eq!(request.max_tokens, 4096);
        assert_eq!(request.tools.len(), 1);
        assert_eq!(request.messages[0].role, role::USER);
        assert!(request.messages[0].content.contains("a cache"));
    }

    #[tokio::test]
    async fn test_falls_back_after_not_found() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            ("m1", not_found("m1")),
            ("m2", tool_response(json!([{"type": "ellipse"}]))),
            ("m3", tool_response(json!([{"type": "diamond"}]))),
        ]));
        let relay = relay_with(provider.clone());

        let result = relay.relay("x").await.unwrap();

        assert_eq!(result, vec![json!({"type": "ellipse"})]);
        assert_eq!(provider.calls(), vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn test_all_not_found_reports_last_error() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            ("m1", not_found("m1")),
            ("m2", not_found("m2")),
            ("m3", not_found("m3")),
        ]));
        let relay = relay_with(provider.clone());

        let err = relay.relay("x").await.unwrap_err();

        match &err {
            RelayError::UpstreamUnavailable { last_error } => {
                assert_eq!(last_error.to_string(), "not_found_error: model: m3");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().starts_with("No Claude models available. Last error: "));
        assert_eq!(provider.calls(), vec!["m1", "m2", "m3"]);
    }

    #[tokio::test]
    async fn test_other_error_aborts_immediately() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            ("m1", not_found("m1")),
            ("m2", Err(ProviderError::Authentication("invalid x-api-key".to_string()))),
            ("m3", tool_response(json!([]))),
        ]));
        let relay = relay_with(provider.clone());

        let err = relay.relay("x").await.unwrap_err();

        assert!(matches!(err, RelayError::Upstream(ProviderError::Authentication(_))));
        assert_eq!(provider.calls(), vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn test_unexpected_stop_reason_stops_the_loop() {
        let end_turn = Ok(MessagesResponse {
            id: "msg_1".to_string(),
            model: "m1".to_string(),
            stop_reason: Some("end_turn".to_string()),
            content: vec![ContentBlock::Text {
                text: "I can't draw that".to_string(),
            }],
        });
        let provider = Arc::new(ScriptedProvider::new(vec![
            ("m1", end_turn),
            ("m2", tool_response(json!([]))),
        ]));
        let relay = relay_with(provider.clone());

        let err = relay.relay("x").await.unwrap_err();

        assert!(matches!(err, RelayError::ResponseShape(_)));
        assert_eq!(err.to_string(), "Unexpected stop_reason: end_turn");
        assert_eq!(provider.calls(), vec!["m1"]);
    }

    #[tokio::test]
    async fn test_non_array_elements_is_shape_error() {
        for bad in [json!({"type": "rectangle"}), json!("rectangle")] {
            let provider = Arc::new(ScriptedProvider::new(vec![("m1", tool_response(bad))]));
            let relay = relay_with(provider.clone());

            let err = relay.relay("x").await.unwrap_err();

            assert!(matches!(err, RelayError::ResponseShape(_)));
            assert_eq!(provider.calls(), vec!["m1"]);
        }
    }

    #[tokio::test]
    async fn test_repeated_prompt_is_idempotent() {
        let elements = json!([{"type": "text", "text": "hi"}]);
        let provider = Arc::new(ScriptedProvider::new(vec![("m1", tool_response(elements))]));
        let relay = relay_with(provider.clone());

        let first = relay.relay("same prompt").await.unwrap();
        let second = relay.relay("same prompt").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.calls(), vec!["m1", "m1"]);
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_client_is_built() {
        let config = test_config();
        let clients = Arc::new(ClientManager::with_lookup(
            Arc::new(config.clone()),
            Arc::new(|_: &str| None),
        ));
        let relay = PromptRelay::new(&config, clients.clone());

        let err = relay.relay("x").await.unwrap_err();

        assert!(matches!(err, RelayError::Configuration(_)));
        assert!(!clients.is_initialized());
    }
}
