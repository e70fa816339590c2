//! Provider implementations

pub mod anthropic;

pub use anthropic::AnthropicProvider;
