//! Input document types.

use serde::{Deserialize, Serialize};

/// One story as a unit of the corpus.
///
/// Immutable once loaded; only derived records outlive analysis.
///
/// # Examples
///
/// ```
/// use fabula_core::Document;
///
/// let doc = Document::new("kristys_great_idea", "My name is Kristy.");
/// assert_eq!(doc.title, "Kristys Great Idea");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier derived from the filename stem
    pub book_id: String,
    /// Human-readable title derived from the identifier
    pub title: String,
    /// Raw document text
    pub text: String,
}

impl Document {
    /// Create a document from its identifier and raw text.
    pub fn new(book_id: impl Into<String>, text: impl Into<String>) -> Self {
        let book_id = book_id.into();
        let title = display_title(&book_id);
        Self {
            book_id,
            title,
            text: text.into(),
        }
    }
}

/// Convert a document identifier into a display title.
///
/// Underscores become spaces and each word is title-cased, so
/// `claudia_and_the_phantom_phone_calls` renders as
/// `Claudia And The Phantom Phone Calls`.
pub fn display_title(book_id: &str) -> String {
    book_id
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_underscored_id() {
        assert_eq!(display_title("kristys_great_idea"), "Kristys Great Idea");
    }

    #[test]
    fn title_from_single_word() {
        assert_eq!(display_title("story"), "Story");
    }

    #[test]
    fn title_skips_empty_segments() {
        assert_eq!(display_title("a__b"), "A B");
    }
}
