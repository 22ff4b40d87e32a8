//! Wire types for the Anthropic messages API.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/messages`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct AnthropicRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A single message in the request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct AnthropicMessage {
    pub role: &'static str,
    pub content: String,
}

/// Response body from the messages API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AnthropicResponse {
    pub id: String,
    pub content: Vec<AnthropicContentBlock>,
}

/// One content block of the response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AnthropicContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}
