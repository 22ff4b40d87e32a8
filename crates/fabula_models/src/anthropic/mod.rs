//! Anthropic messages API backend.

mod client;
mod dto;

pub use client::AnthropicClient;
pub(crate) use dto::{AnthropicContentBlock, AnthropicMessage, AnthropicRequest, AnthropicResponse};
