//! Uniform call gateway over the configured backend.

use crate::{AnthropicClient, GatewayConfig, OllamaClient, OpenAiClient, ProviderKind};
use fabula_error::{BackendError, FabulaResult};
use fabula_interface::{GatewayStatus, GenerateRequest, GenerateResponse, LanguageModel};
use tracing::{debug, info, instrument, warn};

/// Best-effort `prompt -> text` gateway over one configured backend.
///
/// Initialization failure (missing credential, unreachable server,
/// missing model) leaves the gateway in a non-ready state rather than
/// raising; callers must check [`Gateway::ready`] before calling.
/// Once ready, a transport or backend-side error during a call is
/// absorbed into an empty-string response with a logged diagnostic, so
/// the analysis pipeline can fall back instead of crashing. A single
/// attempt is made per call; there is no retry or rate limiting here.
pub struct Gateway {
    backend: Option<Box<dyn LanguageModel>>,
    provider: ProviderKind,
    model: String,
}

impl Gateway {
    /// Construct a gateway for the configured backend.
    ///
    /// Never fails: any initialization problem is logged and recorded as
    /// non-readiness.
    #[instrument(skip(config), fields(provider = %config.provider, model = %config.model))]
    pub async fn connect(config: &GatewayConfig) -> Self {
        let backend: Option<Box<dyn LanguageModel>> = match config.provider {
            ProviderKind::Anthropic => match &config.anthropic_api_key {
                Some(key) => Some(Box::new(AnthropicClient::new(key, &config.model))),
                None => {
                    warn!("No Anthropic API key configured, gateway not ready");
                    None
                }
            },
            ProviderKind::OpenAi => match &config.openai_api_key {
                Some(key) => Some(Box::new(OpenAiClient::new(key, &config.model))),
                None => {
                    warn!("No OpenAI API key configured, gateway not ready");
                    None
                }
            },
            ProviderKind::Ollama => {
                match OllamaClient::new_with_url(&config.model, &config.ollama_url) {
                    Ok(client) => match client.validate().await {
                        Ok(()) => Some(Box::new(client)),
                        Err(e) => {
                            warn!(error = %e, "Ollama validation failed, gateway not ready");
                            None
                        }
                    },
                    Err(e) => {
                        warn!(error = %e, "Failed to create Ollama client, gateway not ready");
                        None
                    }
                }
            }
        };

        if backend.is_some() {
            info!("Gateway ready");
        }

        Self {
            backend,
            provider: config.provider,
            model: config.model.clone(),
        }
    }

    /// Wrap an already-constructed backend, marking the gateway ready.
    ///
    /// Intended for tests that drive the pipeline with a scripted model.
    pub fn from_backend(backend: Box<dyn LanguageModel>, provider: ProviderKind) -> Self {
        let model = backend.model_name().to_string();
        Self {
            backend: Some(backend),
            provider,
            model,
        }
    }

    /// Whether the backend initialized and can accept calls.
    pub fn ready(&self) -> bool {
        self.backend.is_some()
    }

    /// Configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Readiness report for this gateway.
    pub fn status(&self) -> GatewayStatus {
        GatewayStatus {
            provider: self.provider.to_string(),
            model: self.model.clone(),
            ready: self.ready(),
        }
    }

    /// Send a prompt and return the response text.
    ///
    /// # Errors
    ///
    /// Fails only when the gateway never became ready. Backend errors on
    /// an otherwise-ready gateway are logged and surface as an empty
    /// string, which every call site must tolerate.
    #[instrument(skip(self, prompt), fields(prompt_length = prompt.len()))]
    pub async fn call(&self, prompt: &str) -> FabulaResult<String> {
        let Some(backend) = &self.backend else {
            return Err(BackendError::new(format!(
                "gateway for {} is not ready; check credentials or server availability",
                self.provider
            ))
            .into());
        };

        let request = GenerateRequest::new(prompt);
        match backend.generate(&request).await {
            Ok(GenerateResponse { text }) => {
                debug!(response_length = text.len(), "Gateway call succeeded");
                Ok(text)
            }
            Err(e) => {
                warn!(error = %e, "Gateway call failed, returning empty response");
                Ok(String::new())
            }
        }
    }
}
