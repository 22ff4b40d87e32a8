//! Command-line interface for Fabula.
//!
//! Two commands: `analyze` runs the pipeline over a corpus directory, and
//! `status` reports whether the configured backend is reachable. API keys
//! and the Ollama URL come from the environment (or a `.env` file), never
//! from arguments.

use clap::{Parser, Subcommand};
use fabula_error::{ConfigError, ConfigErrorKind, FabulaResult};
use fabula_models::{GatewayConfig, ProviderKind};
use std::path::PathBuf;
use std::str::FromStr;

/// Fabula CLI - narrative analysis over plain-text story corpora.
#[derive(Parser)]
#[command(name = "fabula")]
#[command(about = "Analyze character goals and conflicts across a story corpus", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze every story in a corpus directory
    Analyze {
        /// Directory of plain-text (.txt) stories
        #[arg(short, long)]
        corpus: PathBuf,

        /// LLM provider (anthropic, openai, ollama)
        #[arg(short, long, default_value = "ollama")]
        provider: String,

        /// Model identifier for the chosen provider
        #[arg(short, long, default_value = "gpt-oss:latest")]
        model: String,

        /// Analyze only the first N documents in sorted order
        #[arg(short, long)]
        sample: Option<usize>,

        /// Artifact path (defaults to {corpus}_{model}_visualization.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show detailed progress
        #[arg(short, long)]
        verbose: bool,
    },

    /// Report backend readiness for a provider and model
    Status {
        /// LLM provider (anthropic, openai, ollama)
        #[arg(short, long, default_value = "ollama")]
        provider: String,

        /// Model identifier for the chosen provider
        #[arg(short, long, default_value = "gpt-oss:latest")]
        model: String,
    },
}

/// Resolve a gateway configuration from CLI arguments and the environment.
///
/// Reads `ANTHROPIC_API_KEY`, `OPENAI_API_KEY` and `OLLAMA_URL`; absent
/// variables leave the corresponding field at its default, and readiness
/// is settled later when the gateway connects.
///
/// # Errors
///
/// Fails if the provider name is not one of the supported backends.
pub fn resolve_config(provider: &str, model: &str) -> FabulaResult<GatewayConfig> {
    let provider = ProviderKind::from_str(provider)
        .map_err(|_| ConfigError::new(ConfigErrorKind::UnknownProvider(provider.to_string())))?;

    let mut config = GatewayConfig::new(provider, model);
    config.anthropic_api_key = std::env::var("ANTHROPIC_API_KEY").ok();
    config.openai_api_key = std::env::var("OPENAI_API_KEY").ok();
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        config.ollama_url = url;
    }
    Ok(config)
}
