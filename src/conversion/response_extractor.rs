//! Messages API response to diagram elements
//!
//! Checks that the model stopped to call the diagram tool and pulls the
//! `elements` array out of the tool input.

use crate::core::constants::{stop, tool};
use crate::core::error::RelayError;
use crate::models::anthropic::{ContentBlock, MessagesResponse};
use crate::models::diagram::DiagramElement;
use serde_json::Value;

/// Extract the element list from a successful provider response
///
/// # Errors
///
/// [`RelayError::ResponseShape`] when the stop reason is not `tool_use`, no
/// `create_excalidraw_diagram` block is present, or its `elements` field is
/// not an array. A missing `elements` field yields an empty list.
pub fn extract_elements(response: &MessagesResponse) -> Result<Vec<DiagramElement>, RelayError> {
    let stop_reason = response.stop_reason.as_deref().unwrap_or("none");
    if stop_reason != stop::TOOL_USE {
        return Err(RelayError::ResponseShape(format!(
            "Unexpected stop_reason: {}",
            stop_reason
        )));
    }

    let input = response
        .content
        .iter()
        .find_map(|block| match block {
            ContentBlock::ToolUse { name, input, .. } if name == tool::DIAGRAM_TOOL_NAME => {
                Some(input)
            }
            _ => None,
        })
        .ok_or_else(|| {
            RelayError::ResponseShape(format!("No {} tool call found", tool::DIAGRAM_TOOL_NAME))
        })?;

    match input.get(tool::ELEMENTS_FIELD) {
        None => Ok(Vec::new()),
        Some(Value::Array(elements)) => Ok(elements.clone()),
        Some(_) => Err(RelayError::ResponseShape(
            "Tool response is not an array".to_string(),
        )),
    }
}
