//! Whole-document analysis orchestration.

use crate::{SceneAnalyzer, Segmenter};
use fabula_core::{Conflict, Document, Goal, Scene};
use fabula_error::FabulaResult;
use fabula_models::Gateway;
use tracing::{info, instrument};

/// Combined result of one document's analysis. All sequences may be empty.
#[derive(Debug, Clone, Default)]
pub struct StoryAnalysis {
    /// Scenes in chapter-then-ordinal order
    pub scenes: Vec<Scene>,
    /// Goals in scene order
    pub goals: Vec<Goal>,
    /// Conflicts in scene order
    pub conflicts: Vec<Conflict>,
}

/// Runs the three analysis phases over one document.
///
/// Phases run strictly in order: segmentation, then goal extraction for
/// every scene, then conflict extraction for every scene. Conflict prompts
/// receive the goals already found in their scene. A single scene's failed
/// extraction surfaces as an empty sequence and never aborts the document.
pub struct StoryAnalyzer<'a> {
    gateway: &'a Gateway,
}

impl<'a> StoryAnalyzer<'a> {
    /// Create an analyzer that calls the model through the given gateway.
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Analyze one document.
    ///
    /// Zero scenes after segmentation is a normal terminal state, not an
    /// error: the result is empty and the caller excludes the document
    /// from the corpus result set.
    ///
    /// # Errors
    ///
    /// Fails only when the gateway is not ready (fatal for this document,
    /// not for the run).
    #[instrument(skip(self, document), fields(book_id = %document.book_id))]
    pub async fn analyze(&self, document: &Document) -> FabulaResult<StoryAnalysis> {
        info!(book_id = %document.book_id, "Phase 1: segmenting scenes");

        let segmenter = Segmenter::new(self.gateway);
        let scenes = segmenter.segment(document).await?;
        if scenes.is_empty() {
            info!(book_id = %document.book_id, "No scenes found");
            return Ok(StoryAnalysis::default());
        }

        info!(scenes = scenes.len(), "Phase 2: analyzing goals");

        let analyzer = SceneAnalyzer::new(self.gateway);
        let mut goals = Vec::new();
        for (i, scene) in scenes.iter().enumerate() {
            info!(scene = i + 1, total = scenes.len(), "Analyzing goals");
            let scene_goals = analyzer.extract_goals(scene).await?;
            goals.extend(scene_goals);
        }

        info!(goals = goals.len(), "Phase 3: analyzing conflicts");

        let mut conflicts = Vec::new();
        for (i, scene) in scenes.iter().enumerate() {
            info!(scene = i + 1, total = scenes.len(), "Analyzing conflicts");
            let scene_conflicts = analyzer.extract_conflicts(scene, &goals).await?;
            conflicts.extend(scene_conflicts);
        }

        info!(
            scenes = scenes.len(),
            goals = goals.len(),
            conflicts = conflicts.len(),
            "Document analysis complete"
        );

        Ok(StoryAnalysis {
            scenes,
            goals,
            conflicts,
        })
    }
}
