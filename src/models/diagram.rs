//! Relay request and response bodies

use serde::{Deserialize, Serialize};

/// One Excalidraw element as produced by the model
///
/// Opaque to the relay: fields are passed through unmodified.
pub type DiagramElement = serde_json::Value;

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// Successful body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementsResponse {
    pub elements: Vec<DiagramElement>,
}

/// Failure body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}
