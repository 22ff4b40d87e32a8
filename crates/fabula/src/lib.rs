//! Fabula analyzes corpora of plain-text stories with a language model.
//!
//! Each story is segmented into chapters and scenes, then every scene is
//! mined for character goals and conflicts. Per-document results are
//! aggregated into a corpus summary with a character index and a conflict
//! network, exported as a JSON artifact after every document.
//!
//! This facade crate re-exports the public surface of the workspace and
//! carries the command-line entry point.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cli;

pub use cli::{resolve_config, Cli, Commands};
pub use fabula_analysis::{SceneAnalyzer, Segmenter, StoryAnalysis, StoryAnalyzer};
pub use fabula_core::{
    display_title, BookPreview, Chapter, Conflict, ConflictEdge, ConflictKind, CorpusMetadata,
    CorpusSummary, Document, DocumentResult, Goal, GoalCategory, Scene, ScenePreview, Severity,
};
pub use fabula_corpus::{summarize, summarize_at, Checkpoint, CorpusDriver, JsonExporter};
pub use fabula_error::{FabulaError, FabulaErrorKind, FabulaResult};
pub use fabula_interface::{GatewayStatus, GenerateRequest, GenerateResponse, LanguageModel};
pub use fabula_models::{
    AnthropicClient, Gateway, GatewayConfig, OllamaClient, OpenAiClient, ProviderKind,
};
