//! OpenAI chat completions backend.

mod client;
mod dto;

pub use client::OpenAiClient;
pub(crate) use dto::{OpenAiChoice, OpenAiMessage, OpenAiRequest, OpenAiResponse};
