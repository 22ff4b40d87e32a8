//! Aggregated per-document and corpus-wide result types.

use crate::{Conflict, ConflictKind, Goal, Scene};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum characters retained in a scene text preview.
const PREVIEW_LEN: usize = 200;

/// Everything derived from one successfully analyzed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Owning document identifier
    pub book_id: String,
    /// Display title
    pub title: String,
    /// Scenes in chapter-then-ordinal order
    pub scenes: Vec<Scene>,
    /// Goals in scene order
    pub goals: Vec<Goal>,
    /// Conflicts in scene order
    pub conflicts: Vec<Conflict>,
    /// Number of scenes
    pub scene_count: usize,
    /// Number of goals
    pub goal_count: usize,
    /// Number of conflicts
    pub conflict_count: usize,
}

impl DocumentResult {
    /// Build a result from analysis output, deriving counts.
    pub fn new(
        book_id: impl Into<String>,
        title: impl Into<String>,
        scenes: Vec<Scene>,
        goals: Vec<Goal>,
        conflicts: Vec<Conflict>,
    ) -> Self {
        let scene_count = scenes.len();
        let goal_count = goals.len();
        let conflict_count = conflicts.len();
        Self {
            book_id: book_id.into(),
            title: title.into(),
            scenes,
            goals,
            conflicts,
            scene_count,
            goal_count,
            conflict_count,
        }
    }
}

/// Corpus-wide totals and provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusMetadata {
    /// When the summary was generated (RFC 3339); allowed to vary between runs
    pub generated_at: String,
    /// Model name used for the run
    pub model: String,
    /// Number of books in the summary
    pub total_books: usize,
    /// Total scenes across all books
    pub total_scenes: usize,
    /// Total goals across all books
    pub total_goals: usize,
    /// Total conflicts across all books
    pub total_conflicts: usize,
}

/// A lightweight per-scene entry for dashboard rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePreview {
    /// Scene identifier
    pub scene_id: String,
    /// Scene ordinal within its chapter
    pub scene_num: u32,
    /// Chapter ordinal
    pub chapter: u32,
    /// Leading excerpt of the scene text
    pub text_preview: String,
    /// Full scene text length in characters
    pub text_length: usize,
}

impl ScenePreview {
    /// Build a preview from a scene, truncating the text excerpt.
    pub fn from_scene(scene: &Scene) -> Self {
        let char_count = scene.text.chars().count();
        let text_preview = if char_count > PREVIEW_LEN {
            let head: String = scene.text.chars().take(PREVIEW_LEN).collect();
            format!("{head}...")
        } else {
            scene.text.clone()
        };
        Self {
            scene_id: scene.scene_id.clone(),
            scene_num: scene.scene_num,
            chapter: scene.chapter_num,
            text_preview,
            text_length: char_count,
        }
    }
}

/// Per-book preview block for visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPreview {
    /// Book identifier
    pub book_id: String,
    /// Display title
    pub title: String,
    /// Number of scenes
    pub scene_count: usize,
    /// Scene previews in order
    pub scenes: Vec<ScenePreview>,
}

/// One edge of the conflict network.
///
/// Carries enough fields to render a graph without re-touching
/// per-scene records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictEdge {
    /// Characters sharing the conflict (at least two)
    pub characters: Vec<String>,
    /// Book the conflict occurs in
    pub book_id: String,
    /// Conflict type
    pub conflict_type: ConflictKind,
    /// Conflict description
    pub description: String,
    /// Textual evidence
    pub evidence: String,
}

/// The derived, rebuildable aggregate view over all document results.
///
/// Fully derivable from the set of [`DocumentResult`]s; never the unique
/// source of truth. Maps are ordered so repeated aggregation over the same
/// input serializes byte-identically (timestamp aside).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusSummary {
    /// Corpus-wide totals and provenance
    pub metadata: CorpusMetadata,
    /// Per-book results keyed by book identifier
    pub books: BTreeMap<String, DocumentResult>,
    /// Per-book preview blocks for visualization
    pub previews: Vec<BookPreview>,
    /// Character name to sorted list of books they appear in
    pub characters: BTreeMap<String, Vec<String>>,
    /// Edges between characters sharing a conflict
    pub conflict_network: Vec<ConflictEdge>,
}
