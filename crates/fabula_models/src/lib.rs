//! LLM provider integrations for Fabula.
//!
//! Three backends are supported: Anthropic and OpenAI over their HTTP APIs,
//! and a locally addressable Ollama server. The [`Gateway`] wraps whichever
//! backend is configured behind a uniform `prompt -> text` call contract
//! with readiness reporting.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anthropic;
mod config;
mod gateway;
mod ollama;
mod openai;

pub use anthropic::AnthropicClient;
pub use config::{GatewayConfig, ProviderKind};
pub use gateway::Gateway;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;
