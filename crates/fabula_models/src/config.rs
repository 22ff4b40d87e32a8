//! Gateway configuration.

use fabula_error::{ConfigError, ConfigErrorKind, FabulaResult};
use serde::{Deserialize, Serialize};

/// The closed set of supported backend kinds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderKind {
    /// Anthropic messages API
    Anthropic,
    /// OpenAI chat completions API
    OpenAi,
    /// Locally addressable Ollama server
    Ollama,
}

/// Explicit configuration passed to the gateway at construction.
///
/// Replaces any shared mutable credential store: the caller resolves keys
/// and endpoints up front and hands them over once.
///
/// # Examples
///
/// ```
/// use fabula_models::{GatewayConfig, ProviderKind};
///
/// let config = GatewayConfig::new(ProviderKind::Ollama, "gpt-oss:latest");
/// assert!(config.anthropic_api_key.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Which backend to use
    pub provider: ProviderKind,
    /// Model identifier for the chosen backend
    pub model: String,
    /// Anthropic API key, if available
    pub anthropic_api_key: Option<String>,
    /// OpenAI API key, if available
    pub openai_api_key: Option<String>,
    /// Ollama server URL
    pub ollama_url: String,
}

impl GatewayConfig {
    /// Create a configuration with no credentials and the default Ollama URL.
    pub fn new(provider: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            anthropic_api_key: None,
            openai_api_key: None,
            ollama_url: "http://localhost:11434".to_string(),
        }
    }

    /// Check that the configured provider has the credential it needs.
    ///
    /// Ollama needs no credential; its server reachability is settled at
    /// connect time.
    ///
    /// # Errors
    ///
    /// Fails when a hosted provider is configured without its API key.
    pub fn require_credentials(&self) -> FabulaResult<()> {
        match self.provider {
            ProviderKind::Anthropic if self.anthropic_api_key.is_none() => Err(ConfigError::new(
                ConfigErrorKind::MissingApiKey("ANTHROPIC_API_KEY".to_string()),
            )
            .into()),
            ProviderKind::OpenAi if self.openai_api_key.is_none() => Err(ConfigError::new(
                ConfigErrorKind::MissingApiKey("OPENAI_API_KEY".to_string()),
            )
            .into()),
            _ => Ok(()),
        }
    }
}
