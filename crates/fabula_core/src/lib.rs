//! Core data types for the Fabula narrative analysis pipeline.
//!
//! This crate provides the domain records shared across the pipeline:
//! documents and chapters on the input side, scenes, goals and conflicts
//! as analysis output, and the aggregated corpus summary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chapter;
mod conflict;
mod document;
mod goal;
mod scene;
mod summary;

pub use chapter::Chapter;
pub use conflict::{Conflict, ConflictKind, Severity};
pub use document::{display_title, Document};
pub use goal::{Goal, GoalCategory};
pub use scene::Scene;
pub use summary::{
    BookPreview, ConflictEdge, CorpusMetadata, CorpusSummary, DocumentResult, ScenePreview,
};
