//! Chapter types produced by heading detection.

use serde::{Deserialize, Serialize};

/// A chapter span of a document.
///
/// Produced by chapter detection and consumed only by scene segmentation;
/// chapters are not persisted independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Identifier, `{book_id}_chapter_{n}`
    pub chapter_id: String,
    /// Ordinal number within the document, starting at 1
    pub chapter_num: u32,
    /// Chapter text span
    pub text: String,
}

impl Chapter {
    /// Create a chapter with an identifier derived from the owning document.
    pub fn new(book_id: &str, chapter_num: u32, text: impl Into<String>) -> Self {
        Self {
            chapter_id: format!("{book_id}_chapter_{chapter_num}"),
            chapter_num,
            text: text.into(),
        }
    }
}
