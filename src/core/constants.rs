//! Constants for the Messages API wire format and relay setup
//!
//! This module defines string constants used throughout the application for
//! message roles, tool names, stop reasons, provider error types and
//! environment variable names.

/// Message role constants
pub mod role {
    /// User role identifier
    pub const USER: &str = "user";
}

/// Diagram tool constants
pub mod tool {
    /// Name of the single tool the model is offered
    pub const DIAGRAM_TOOL_NAME: &str = "create_excalidraw_diagram";

    /// Human readable description sent with the tool definition
    pub const DIAGRAM_TOOL_DESCRIPTION: &str = "Create an Excalidraw diagram with visual elements";

    /// Field of the tool input holding the element list
    pub const ELEMENTS_FIELD: &str = "elements";
}

/// Stop reason constants
pub mod stop {
    /// Tool use stop reason
    pub const TOOL_USE: &str = "tool_use";
}

/// Error `type` values reported in Anthropic error bodies
pub mod api_error {
    /// Requested resource (usually the model) does not exist
    pub const NOT_FOUND: &str = "not_found_error";

    /// Invalid or missing API key
    pub const AUTHENTICATION: &str = "authentication_error";

    /// Account or key hit its rate limit
    pub const RATE_LIMIT: &str = "rate_limit_error";

    /// Malformed request
    pub const INVALID_REQUEST: &str = "invalid_request_error";
}

/// Environment variable names
pub mod env {
    /// Primary API key variable
    pub const PRIMARY_API_KEY: &str = "ANTHROPIC_API_KEY";

    /// Fallback API key variable
    pub const FALLBACK_API_KEY: &str = "CLAUDE_API_KEY";

    /// Path of the TOML configuration file
    pub const CONFIG_PATH: &str = "CONFIG_PATH";
}

/// HTTP header names used by the Anthropic API
pub mod header {
    /// API key header
    pub const API_KEY: &str = "x-api-key";

    /// API version header
    pub const ANTHROPIC_VERSION: &str = "anthropic-version";
}
