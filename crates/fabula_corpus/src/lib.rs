//! Corpus-level orchestration for Fabula.
//!
//! The driver walks a directory of plain-text stories, analyzes each one,
//! and persists the accumulated summary after every document so a partial
//! run always leaves a usable artifact behind.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;
mod driver;
mod export;

pub use aggregate::{summarize, summarize_at};
pub use driver::{Checkpoint, CorpusDriver};
pub use export::JsonExporter;
