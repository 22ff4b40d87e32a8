//! Core trait all language model backends implement.

use crate::{GenerateRequest, GenerateResponse};
use async_trait::async_trait;
use fabula_error::FabulaResult;

/// Minimal interface for text generation backends.
///
/// Implementations make a single attempt per call; retry and rate limiting
/// are deliberately not part of this contract. Callers that need
/// best-effort semantics wrap a `LanguageModel` in the gateway, which
/// absorbs transport errors.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate text for a single prompt.
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<GenerateResponse>;

    /// Provider name (e.g., "anthropic", "openai", "ollama").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "claude-sonnet-4-5", "gpt-oss:latest").
    fn model_name(&self) -> &str;
}
