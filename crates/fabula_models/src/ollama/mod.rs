//! Local Ollama server backend.

mod client;

pub use client::OllamaClient;
