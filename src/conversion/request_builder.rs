//! Prompt to Messages API request conversion
//!
//! Wraps the caller's prompt in the fixed drawing instructions and attaches
//! the diagram tool so the model can answer with structured elements.

use crate::core::constants::{role, tool};
use crate::models::anthropic::{Message, MessagesRequest, ToolDefinition};
use serde_json::json;

/// Build the instruction text sent as the single user message
pub fn build_instruction(prompt: &str) -> String {
    format!(
        r##"Create an Excalidraw diagram for: {prompt}

IMPORTANT RULES:
1. Always start with a cameraUpdate element: {{"type":"cameraUpdate","width":800,"height":600,"x":0,"y":0}}
2. Use labeled shapes when possible: {{"type":"rectangle","id":"r1","x":100,"y":100,"width":200,"height":100,"label":{{"text":"Label","fontSize":20}}}}
3. Use colors from palette: #4a9eed (blue), #22c55e (green), #f59e0b (amber), #ef4444 (red)
4. Keep elements compact and readable
5. Use roundness for rounded rectangles: {{"roundness":{{"type":3}}}}

Call the {tool_name} tool with your elements array."##,
        prompt = prompt,
        tool_name = tool::DIAGRAM_TOOL_NAME,
    )
}

/// Definition of the `create_excalidraw_diagram` tool
pub fn diagram_tool() -> ToolDefinition {
    ToolDefinition {
        name: tool::DIAGRAM_TOOL_NAME.to_string(),
        description: Some(tool::DIAGRAM_TOOL_DESCRIPTION.to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "elements": {
                    "type": "array",
                    "description": "Array of Excalidraw element objects",
                    "items": {
                        "type": "object"
                    }
                }
            },
            "required": ["elements"]
        }),
    }
}

/// Build the request for one model attempt
pub fn build_request(model: &str, prompt: &str, max_tokens: u32) -> MessagesRequest {
    MessagesRequest {
        model: model.to_string(),
        max_tokens,
        tools: vec![diagram_tool()],
        messages: vec![Message {
            role: role::USER.to_string(),
            content: build_instruction(prompt),
        }],
    }
}
