//! Application configuration management
//!
//! This module handles loading and validating configuration from TOML files.
//! Every field has a default, so running without a config file is valid.
//! API credentials are not part of the file; they are read lazily from the
//! environment by [`crate::core::client::ClientManager`].

use crate::core::constants::env;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default output token cap per provider call
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Default request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT: u64 = 90;

/// Default server port
const DEFAULT_PORT: u16 = 3002;

/// Default Anthropic API base URL
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default Anthropic API version header value
const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";

/// Model reported by the health endpoint
const DEFAULT_HEALTH_MODEL: &str = "claude-3-5-sonnet-20240620";

/// Models tried in order until one is available to the API key
const DEFAULT_CANDIDATES: [&str; 3] = [
    "claude-sonnet-4-5",
    "claude-3-5-sonnet-20240620",
    "claude-3-sonnet-20240229",
];

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_anthropic_version")]
    pub anthropic_version: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            anthropic_version: default_anthropic_version(),
            request_timeout: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
    #[serde(default = "default_health_model")]
    pub health_model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
            health_model: default_health_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_anthropic_version() -> String {
    DEFAULT_ANTHROPIC_VERSION.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_candidates() -> Vec<String> {
    DEFAULT_CANDIDATES.iter().map(|m| m.to_string()).collect()
}

fn default_health_model() -> String {
    DEFAULT_HEALTH_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub anthropic: AnthropicConfig,
    #[serde(default)]
    pub models: ModelConfig,
}

/// Application configuration
///
/// Loaded once at startup and validated so a bad file fails fast instead of
/// surfacing on the first request.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Logging level
    pub log_level: String,

    /// Anthropic API base URL
    pub base_url: String,

    /// Value of the `anthropic-version` header
    pub anthropic_version: String,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Ordered model candidates for the fallback loop
    pub candidates: Vec<String>,

    /// Model reported by `/health`
    pub health_model: String,

    /// Output token cap per provider call
    pub max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default())
    }
}

impl Config {
    fn from_toml(config: TomlConfig) -> Self {
        Config {
            host: config.server.host,
            port: config.server.port,
            log_level: config.server.log_level,
            base_url: config.anthropic.base_url,
            anthropic_version: config.anthropic.anthropic_version,
            request_timeout: config.anthropic.request_timeout,
            candidates: config.models.candidates,
            health_model: config.models.health_model,
            max_tokens: config.models.max_tokens,
        }
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns error if the text is not valid TOML for this schema or if
    /// [`Config::validate`] rejects the values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig =
            toml::from_str(content).context("Failed to parse TOML configuration")?;
        let config = Self::from_toml(config);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The TOML file cannot be read or parsed
    /// - Configuration values are invalid
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from `CONFIG_PATH` (default `config.toml`)
    ///
    /// A missing file yields the defaults.
    pub fn from_env() -> Result<Self> {
        let config_path =
            std::env::var(env::CONFIG_PATH).unwrap_or_else(|_| "config.toml".to_string());
        if !Path::new(&config_path).exists() {
            return Ok(Self::default());
        }
        Self::from_file(config_path)
    }

    /// Check value constraints the schema cannot express
    pub fn validate(&self) -> Result<()> {
        if self.candidates.is_empty() {
            bail!("models.candidates must list at least one model");
        }
        if self.candidates.iter().any(|m| m.trim().is_empty()) {
            bail!("models.candidates must not contain empty model names");
        }
        if self.max_tokens == 0 {
            bail!("models.max_tokens must be greater than zero");
        }
        Ok(())
    }
}
