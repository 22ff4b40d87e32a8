//! Scene segmentation and narrative analysis for Fabula.
//!
//! The pipeline runs three phases per document: chapter/scene segmentation,
//! per-scene goal extraction, and per-scene conflict extraction. Each phase
//! prompts the configured language model through the gateway and parses the
//! semi-structured reply into typed records, falling back to empty results
//! when the model misbehaves.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod segmenter;
mod scenes;
mod story;

pub use extraction::{extract_json, parse_payload};
pub use scenes::SceneAnalyzer;
pub use segmenter::Segmenter;
pub use story::{StoryAnalysis, StoryAnalyzer};

/// Truncate text to at most `max_chars` characters, respecting char boundaries.
pub(crate) fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::char_prefix;

    #[test]
    fn prefix_shorter_text_is_unchanged() {
        assert_eq!(char_prefix("abc", 10), "abc");
    }

    #[test]
    fn prefix_counts_chars_not_bytes() {
        assert_eq!(char_prefix("événement", 3), "évé");
    }
}
