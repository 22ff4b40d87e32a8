//! Ollama LLM client implementation.

use ollama_rs::generation::completion::request::GenerationRequest as OllamaRequest;
use ollama_rs::Ollama;

use fabula_error::{FabulaResult, ModelsError, ModelsErrorKind};
use fabula_interface::{GenerateRequest, GenerateResponse, LanguageModel};
use tracing::{debug, info, instrument, warn};

/// Ollama LLM client for local model execution.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    /// Ollama client instance
    client: Ollama,

    /// Model name (e.g., "llama3", "mistral", "gpt-oss:latest")
    model_name: String,

    /// Ollama server URL
    base_url: String,
}

impl OllamaClient {
    /// Create a new Ollama client with default localhost connection.
    pub fn new(model_name: impl Into<String>) -> Result<Self, ModelsError> {
        Self::new_with_url(model_name, "http://localhost:11434")
    }

    /// Create a new Ollama client with custom server URL.
    pub fn new_with_url(
        model_name: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ModelsError> {
        let model_name = model_name.into();
        let base_url = base_url.into();

        info!(
            model = %model_name,
            url = %base_url,
            "Creating Ollama client"
        );

        let client = Ollama::try_new(base_url.clone()).map_err(|e| {
            warn!(error = %e, "Invalid Ollama server URL");
            ModelsError::new(ModelsErrorKind::ServerUnreachable(base_url.clone()))
        })?;

        Ok(Self {
            client,
            model_name,
            base_url,
        })
    }

    /// Check if the Ollama server is running and the model is available.
    #[instrument(skip(self))]
    pub async fn validate(&self) -> Result<(), ModelsError> {
        debug!("Validating Ollama server and model availability");

        match self.client.list_local_models().await {
            Ok(models) => {
                debug!(count = models.len(), "Found local models");

                let model_exists = models.iter().any(|m| m.name == self.model_name);

                if !model_exists {
                    warn!(
                        model = %self.model_name,
                        available = ?models.iter().map(|m| &m.name).collect::<Vec<_>>(),
                        "Model not found locally"
                    );

                    return Err(ModelsError::new(ModelsErrorKind::ModelNotFound(
                        self.model_name.clone(),
                    )));
                }

                info!("Ollama server and model validated");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to connect to Ollama server");
                Err(ModelsError::new(ModelsErrorKind::ServerUnreachable(
                    self.base_url.clone(),
                )))
            }
        }
    }
}

#[async_trait::async_trait]
impl LanguageModel for OllamaClient {
    #[instrument(skip(self, request))]
    async fn generate(&self, request: &GenerateRequest) -> FabulaResult<GenerateResponse> {
        debug!(prompt_length = request.prompt.len(), "Generating with Ollama");

        let ollama_req = OllamaRequest::new(self.model_name.clone(), request.prompt.clone());

        let response = self.client.generate(ollama_req).await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::Http(format!("Ollama generate failed: {e}")))
        })?;

        debug!(
            response_length = response.response.len(),
            "Received response from Ollama"
        );

        Ok(GenerateResponse::new(response.response))
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
