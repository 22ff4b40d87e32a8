//! OpenAI API client implementation.

use super::{OpenAiMessage, OpenAiRequest, OpenAiResponse};
use fabula_error::{FabulaResult, ModelsError, ModelsErrorKind};
use fabula_interface::{GenerateRequest, GenerateResponse, LanguageModel};
use reqwest::Client;
use tracing::{debug, error, instrument};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI API client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a new OpenAI client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model identifier (e.g., "gpt-4o-mini")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let model = model.into();
        debug!("Creating new OpenAI client");
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }

    /// Sends a request to the chat completions endpoint.
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn generate_openai(&self, request: &OpenAiRequest) -> Result<OpenAiResponse, ModelsError> {
        debug!("Sending request to OpenAI API");

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to OpenAI API");
                ModelsError::new(ModelsErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "OpenAI API returned error");
            return Err(ModelsError::new(ModelsErrorKind::ApiError {
                status: status.as_u16(),
                message: body,
            }));
        }

        response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse OpenAI response");
            ModelsError::new(ModelsErrorKind::Parse(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }

    /// Converts a generation request to an OpenAI API request.
    fn convert_request(&self, request: &GenerateRequest) -> OpenAiRequest {
        OpenAiRequest {
            model: self.model.clone(),
            messages: vec![OpenAiMessage {
                role: "user".to_string(),
                content: Some(request.prompt.clone()),
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Extracts the first choice's text from an OpenAI response.
    fn convert_response(response: &OpenAiResponse) -> Result<GenerateResponse, ModelsError> {
        let text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ModelsError::new(ModelsErrorKind::EmptyResponse));
        }

        Ok(GenerateResponse::new(text))
    }
}

#[async_trait::async_trait]
impl LanguageModel for OpenAiClient {
    #[instrument(skip(self, request))]
    async fn generate(&self, request: &GenerateRequest) -> FabulaResult<GenerateResponse> {
        debug!("Generating response with OpenAI");

        let openai_request = self.convert_request(request);
        let openai_response = self.generate_openai(&openai_request).await?;
        let response = Self::convert_response(&openai_response)?;

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_conversion_takes_first_choice() {
        let response = OpenAiResponse {
            choices: vec![super::super::OpenAiChoice {
                message: OpenAiMessage {
                    role: "assistant".to_string(),
                    content: Some("{\"goals\": []}".to_string()),
                },
            }],
        };
        let converted = OpenAiClient::convert_response(&response).unwrap();
        assert_eq!(converted.text, "{\"goals\": []}");
    }

    #[test]
    fn response_conversion_rejects_no_choices() {
        let response = OpenAiResponse { choices: vec![] };
        assert!(OpenAiClient::convert_response(&response).is_err());
    }
}
