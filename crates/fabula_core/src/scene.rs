//! Scene types, the unit of analysis.

use serde::{Deserialize, Serialize};

/// A contiguous span of text judged to occur in one place and time.
///
/// Created once by the segmenter and read-only afterward. Scene identifiers
/// are deterministic from position (`{chapter_id}_scene_{n}`), so re-running
/// analysis over the same document re-derives the same ids.
///
/// # Examples
///
/// ```
/// use fabula_core::Scene;
///
/// let scene = Scene::new("book_1_chapter_2", "book_1", 2, 1, "We met at Claudia's.");
/// assert_eq!(scene.scene_id, "book_1_chapter_2_scene_1");
/// assert_eq!(scene.narrator, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Identifier, `{chapter_id}_scene_{n}`
    pub scene_id: String,
    /// Owning document identifier
    pub book_id: String,
    /// Chapter ordinal this scene belongs to
    pub chapter_num: u32,
    /// Scene ordinal within the chapter, restarting at 1 per chapter
    pub scene_num: u32,
    /// Scene text
    pub text: String,
    /// Inferred viewpoint character for the owning chapter, if any
    #[serde(default)]
    pub narrator: Option<String>,
    /// First paragraph index, when paragraph bounds are known
    #[serde(default)]
    pub start_paragraph: Option<u32>,
    /// Last paragraph index, when paragraph bounds are known
    #[serde(default)]
    pub end_paragraph: Option<u32>,
}

impl Scene {
    /// Create a scene with an identifier derived from its position.
    pub fn new(
        chapter_id: &str,
        book_id: impl Into<String>,
        chapter_num: u32,
        scene_num: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            scene_id: format!("{chapter_id}_scene_{scene_num}"),
            book_id: book_id.into(),
            chapter_num,
            scene_num,
            text: text.into(),
            narrator: None,
            start_paragraph: None,
            end_paragraph: None,
        }
    }

    /// Set the narrator, consuming and returning the scene.
    pub fn with_narrator(mut self, narrator: Option<String>) -> Self {
        self.narrator = narrator;
        self
    }

    /// Set paragraph bounds, consuming and returning the scene.
    ///
    /// Only segmentation paths that know where the scene sits in its
    /// chapter's paragraph sequence set these; model-listed scenes carry
    /// no offsets and leave the bounds unset.
    pub fn with_paragraph_bounds(mut self, start: u32, end: u32) -> Self {
        self.start_paragraph = Some(start);
        self.end_paragraph = Some(end);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_bounds_are_unset_by_default() {
        let scene = Scene::new("b_chapter_1", "b", 1, 1, "text");
        assert_eq!(scene.start_paragraph, None);
        assert_eq!(scene.end_paragraph, None);
    }

    #[test]
    fn paragraph_bounds_builder_sets_both() {
        let scene = Scene::new("b_chapter_1", "b", 1, 1, "text").with_paragraph_bounds(0, 3);
        assert_eq!(scene.start_paragraph, Some(0));
        assert_eq!(scene.end_paragraph, Some(3));
    }
}
