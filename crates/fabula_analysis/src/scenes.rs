//! Per-scene goal and conflict extraction.

use crate::{char_prefix, extraction::parse_payload};
use fabula_core::{Conflict, ConflictKind, Goal, GoalCategory, Scene, Severity};
use fabula_error::FabulaResult;
use fabula_models::Gateway;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Prefix of scene text sent for goal and conflict analysis.
const ANALYSIS_SAMPLE_CHARS: usize = 4000;

/// Confidence assigned to every extracted goal.
const GOAL_CONFIDENCE: f32 = 0.8;

/// Goal extraction payload.
#[derive(Debug, Deserialize)]
struct GoalsPayload {
    #[serde(default)]
    goals: Vec<GoalEntry>,
}

/// One goal listed by the model.
#[derive(Debug, Deserialize)]
struct GoalEntry {
    #[serde(default)]
    character: Option<String>,
    #[serde(default)]
    goal: String,
    #[serde(default)]
    evidence: String,
    #[serde(default)]
    category: String,
}

/// Conflict extraction payload.
#[derive(Debug, Deserialize)]
struct ConflictsPayload {
    #[serde(default)]
    conflicts: Vec<ConflictEntry>,
}

/// One conflict listed by the model.
#[derive(Debug, Deserialize)]
struct ConflictEntry {
    #[serde(default)]
    characters_involved: Vec<String>,
    #[serde(default)]
    conflict_type: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    evidence: String,
    #[serde(default)]
    severity: Option<String>,
    #[serde(default)]
    rationale: Option<String>,
}

/// Extracts goals and conflicts from one scene at a time.
///
/// Both extractions are read-only with respect to the scene. Malformed or
/// empty model responses yield empty sequences; this is a tolerated,
/// non-fatal outcome, not an error.
pub struct SceneAnalyzer<'a> {
    gateway: &'a Gateway,
}

impl<'a> SceneAnalyzer<'a> {
    /// Create an analyzer that calls the model through the given gateway.
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Extract character goals from a scene.
    ///
    /// # Errors
    ///
    /// Fails only when the gateway is not ready.
    #[instrument(skip(self, scene), fields(scene_id = %scene.scene_id))]
    pub async fn extract_goals(&self, scene: &Scene) -> FabulaResult<Vec<Goal>> {
        let sample = char_prefix(&scene.text, ANALYSIS_SAMPLE_CHARS);
        let prompt = goals_prompt(scene, sample);

        let response = self.gateway.call(&prompt).await?;

        let Some(payload) = parse_payload::<GoalsPayload>(&response) else {
            warn!("Goal payload unparseable, scene yields no goals");
            return Ok(Vec::new());
        };

        let goals = payload
            .goals
            .into_iter()
            .enumerate()
            .map(|(i, entry)| Goal {
                goal_id: format!("{}_goal_{}", scene.scene_id, i + 1),
                scene_id: scene.scene_id.clone(),
                book_id: scene.book_id.clone(),
                character: entry
                    .character
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| "Unknown".to_string()),
                goal_text: entry.goal,
                category: GoalCategory::from_label(&entry.category),
                evidence: entry.evidence,
                confidence: GOAL_CONFIDENCE,
            })
            .collect::<Vec<_>>();

        debug!(goals = goals.len(), "Extracted goals");
        Ok(goals)
    }

    /// Extract interpersonal conflicts from a scene.
    ///
    /// `all_goals` is the document's accumulated goals; the prompt context
    /// and `goals_affected` linkage are filtered to this scene's goals.
    ///
    /// # Errors
    ///
    /// Fails only when the gateway is not ready.
    #[instrument(skip(self, scene, all_goals), fields(scene_id = %scene.scene_id))]
    pub async fn extract_conflicts(
        &self,
        scene: &Scene,
        all_goals: &[Goal],
    ) -> FabulaResult<Vec<Conflict>> {
        let scene_goals: Vec<&Goal> = all_goals
            .iter()
            .filter(|goal| goal.scene_id == scene.scene_id)
            .collect();

        let sample = char_prefix(&scene.text, ANALYSIS_SAMPLE_CHARS);
        let prompt = conflicts_prompt(scene, sample, &scene_goals);

        let response = self.gateway.call(&prompt).await?;

        let Some(payload) = parse_payload::<ConflictsPayload>(&response) else {
            warn!("Conflict payload unparseable, scene yields no conflicts");
            return Ok(Vec::new());
        };

        let conflicts = payload
            .conflicts
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let goals_affected = scene_goals
                    .iter()
                    .filter(|goal| entry.characters_involved.contains(&goal.character))
                    .map(|goal| goal.goal_id.clone())
                    .collect();

                Conflict {
                    conflict_id: format!("{}_conflict_{}", scene.scene_id, i + 1),
                    scene_id: scene.scene_id.clone(),
                    book_id: scene.book_id.clone(),
                    conflict_type: ConflictKind::from_label(&entry.conflict_type),
                    description: entry.description,
                    characters_involved: entry.characters_involved,
                    goals_affected,
                    evidence: entry.evidence,
                    severity: entry
                        .severity
                        .as_deref()
                        .map(Severity::from_label)
                        .unwrap_or_default(),
                    rationale: entry.rationale.unwrap_or_default(),
                }
            })
            .collect::<Vec<_>>();

        debug!(conflicts = conflicts.len(), "Extracted conflicts");
        Ok(conflicts)
    }
}

/// Prompt asking the model for character goals in a scene.
fn goals_prompt(scene: &Scene, sample: &str) -> String {
    format!(
        r#"Analyze character goals in this story scene:

Scene: {scene_id} (Chapter {chapter})
Narrator/POV: {narrator}

Text:
{sample}

Find what characters want or try to achieve. Pay special attention to the narrator's goals and motivations since this is their perspective.

For each goal, provide a DIRECT QUOTE from the text as evidence.

Respond in JSON:
{{
  "goals": [
    {{
      "character": "Character Name",
      "goal": "What they want to achieve",
      "evidence": "EXACT quote from text that shows this goal",
      "category": "social/family/personal/academic/babysitting/other",
      "is_narrator": true/false
    }}
  ]
}}

IMPORTANT:
- Evidence must be exact quotes from the text (phrases or sentences)
- Only include goals with clear textual evidence
- Mark if the goal belongs to the narrator character
- Focus especially on the narrator's internal motivations
- Each goal needs a direct quote showing the character's intention"#,
        scene_id = scene.scene_id,
        chapter = scene.chapter_num,
        narrator = scene.narrator.as_deref().unwrap_or("Unknown"),
    )
}

/// Prompt asking the model for conflicts in a scene, given its goals.
fn conflicts_prompt(scene: &Scene, sample: &str, scene_goals: &[&Goal]) -> String {
    let goals_context = scene_goals
        .iter()
        .map(|goal| format!("- {}: {}", goal.character, goal.goal_text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Analyze conflicts in this story scene:

Scene: {scene_id} (Chapter {chapter})
Narrator/POV: {narrator}

Text:
{sample}

Identified Goals in this scene:
{goals_context}

Find disagreements, tensions, or conflicts between characters. Consider the narrator's perspective since this is their viewpoint.

Respond in JSON:
{{
  "conflicts": [
    {{
      "characters_involved": ["First Character", "Second Character"],
      "conflict_type": "disagreement/rivalry/misunderstanding/competition/other",
      "description": "Brief description of the conflict",
      "evidence": "EXACT quote showing the conflict",
      "severity": "low/medium/high",
      "involves_narrator": true/false
    }}
  ]
}}

IMPORTANT:
- Evidence must be exact quotes from the text
- Only include conflicts with clear textual evidence
- List every character involved in characters_involved
- Mark if the narrator is involved in the conflict
- Focus on interpersonal tensions and disagreements
- Each conflict needs a direct quote as evidence"#,
        scene_id = scene.scene_id,
        chapter = scene.chapter_num,
        narrator = scene.narrator.as_deref().unwrap_or("Unknown"),
    )
}
