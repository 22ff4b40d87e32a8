//! Request and response types for text generation.

use serde::{Deserialize, Serialize};

/// A single-prompt text generation request.
///
/// The analysis pipeline is text-in, text-out; there is no conversation
/// history, so a request is one prompt plus sampling parameters.
///
/// # Examples
///
/// ```
/// use fabula_interface::GenerateRequest;
///
/// let request = GenerateRequest::new("Identify the narrator of this chapter.");
/// assert!(request.max_tokens.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerateRequest {
    /// The prompt to send
    pub prompt: String,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
}

impl GenerateRequest {
    /// Create a request with default sampling parameters.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// The unified response object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated text
    pub text: String,
}

impl GenerateResponse {
    /// Wrap generated text in a response.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
