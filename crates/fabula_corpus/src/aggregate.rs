//! Cross-document aggregation.
//!
//! `summarize` is a pure function over the accumulated document results:
//! recomputed from scratch at every persistence point, never incrementally
//! patched, so the summary can never drift from its inputs.

use fabula_core::{
    BookPreview, ConflictEdge, CorpusMetadata, CorpusSummary, DocumentResult, ScenePreview,
};
use std::collections::{BTreeMap, BTreeSet};

/// Character name excluded from the per-character index.
const UNKNOWN: &str = "Unknown";

/// Summarize the accumulated results with the current timestamp.
pub fn summarize(results: &BTreeMap<String, DocumentResult>, model: &str) -> CorpusSummary {
    summarize_at(results, model, chrono::Utc::now().to_rfc3339())
}

/// Summarize the accumulated results with an explicit timestamp.
///
/// Deterministic given its inputs: maps are ordered and books are visited
/// in key order, so two calls over the same mapping serialize identically.
pub fn summarize_at(
    results: &BTreeMap<String, DocumentResult>,
    model: &str,
    generated_at: String,
) -> CorpusSummary {
    let metadata = CorpusMetadata {
        generated_at,
        model: model.to_string(),
        total_books: results.len(),
        total_scenes: results.values().map(|r| r.scene_count).sum(),
        total_goals: results.values().map(|r| r.goal_count).sum(),
        total_conflicts: results.values().map(|r| r.conflict_count).sum(),
    };

    let previews = results
        .values()
        .map(|result| BookPreview {
            book_id: result.book_id.clone(),
            title: result.title.clone(),
            scene_count: result.scene_count,
            scenes: result.scenes.iter().map(ScenePreview::from_scene).collect(),
        })
        .collect();

    let mut characters: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for result in results.values() {
        for goal in &result.goals {
            record_character(&mut characters, &goal.character, &result.book_id);
        }
        for conflict in &result.conflicts {
            for name in &conflict.characters_involved {
                record_character(&mut characters, name, &result.book_id);
            }
        }
    }
    let characters = characters
        .into_iter()
        .map(|(name, books)| (name, books.into_iter().collect()))
        .collect();

    let conflict_network = results
        .values()
        .flat_map(|result| result.conflicts.iter())
        .filter(|conflict| conflict.characters_involved.len() >= 2)
        .map(|conflict| ConflictEdge {
            characters: conflict.characters_involved.clone(),
            book_id: conflict.book_id.clone(),
            conflict_type: conflict.conflict_type,
            description: conflict.description.clone(),
            evidence: conflict.evidence.clone(),
        })
        .collect();

    CorpusSummary {
        metadata,
        books: results.clone(),
        previews,
        characters,
        conflict_network,
    }
}

/// Record one character sighting, excluding the unknown placeholder.
fn record_character(
    characters: &mut BTreeMap<String, BTreeSet<String>>,
    name: &str,
    book_id: &str,
) {
    let name = name.trim();
    if name.is_empty() || name == UNKNOWN {
        return;
    }
    characters
        .entry(name.to_string())
        .or_default()
        .insert(book_id.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_core::{Conflict, ConflictKind, Goal, GoalCategory, Scene, Severity};

    fn sample_results() -> BTreeMap<String, DocumentResult> {
        let scene = Scene::new("book_1_chapter_1", "book_1", 1, 1, "Kristy spoke first.");
        let goal = Goal {
            goal_id: "book_1_chapter_1_scene_1_goal_1".to_string(),
            scene_id: "book_1_chapter_1_scene_1".to_string(),
            book_id: "book_1".to_string(),
            character: "Kristy".to_string(),
            goal_text: "start the club".to_string(),
            category: GoalCategory::Social,
            evidence: "Kristy spoke first.".to_string(),
            confidence: 0.8,
        };
        let unknown_goal = Goal {
            goal_id: "book_1_chapter_1_scene_1_goal_2".to_string(),
            character: UNKNOWN.to_string(),
            ..goal.clone()
        };
        let conflict = Conflict {
            conflict_id: "book_1_chapter_1_scene_1_conflict_1".to_string(),
            scene_id: "book_1_chapter_1_scene_1".to_string(),
            book_id: "book_1".to_string(),
            conflict_type: ConflictKind::Disagreement,
            description: "Kristy and Stacey disagree".to_string(),
            characters_involved: vec!["Kristy".to_string(), "Stacey".to_string()],
            goals_affected: vec!["book_1_chapter_1_scene_1_goal_1".to_string()],
            evidence: "Kristy spoke first.".to_string(),
            severity: Severity::Medium,
            rationale: String::new(),
        };
        let solo_conflict = Conflict {
            conflict_id: "book_1_chapter_1_scene_1_conflict_2".to_string(),
            characters_involved: vec!["Kristy".to_string()],
            ..conflict.clone()
        };

        let result = DocumentResult::new(
            "book_1",
            "Book 1",
            vec![scene],
            vec![goal, unknown_goal],
            vec![conflict, solo_conflict],
        );

        let mut results = BTreeMap::new();
        results.insert("book_1".to_string(), result);
        results
    }

    #[test]
    fn totals_are_exact_sums() {
        let summary = summarize(&sample_results(), "test-model");
        assert_eq!(summary.metadata.total_books, 1);
        assert_eq!(summary.metadata.total_scenes, 1);
        assert_eq!(summary.metadata.total_goals, 2);
        assert_eq!(summary.metadata.total_conflicts, 2);
        assert_eq!(summary.metadata.model, "test-model");
    }

    #[test]
    fn unknown_is_excluded_from_character_index() {
        let summary = summarize(&sample_results(), "test-model");
        assert!(summary.characters.contains_key("Kristy"));
        assert!(summary.characters.contains_key("Stacey"));
        assert!(!summary.characters.contains_key(UNKNOWN));
        assert_eq!(summary.characters["Kristy"], vec!["book_1".to_string()]);
    }

    #[test]
    fn unknown_survives_in_raw_records() {
        let summary = summarize(&sample_results(), "test-model");
        let raw = &summary.books["book_1"];
        assert!(raw.goals.iter().any(|g| g.character == UNKNOWN));
    }

    #[test]
    fn conflict_network_requires_two_characters() {
        let summary = summarize(&sample_results(), "test-model");
        assert_eq!(summary.conflict_network.len(), 1);
        assert_eq!(summary.conflict_network[0].characters.len(), 2);
    }

    #[test]
    fn summarize_is_idempotent() {
        let results = sample_results();
        let first = summarize_at(&results, "test-model", "2026-01-01T00:00:00Z".to_string());
        let second = summarize_at(&results, "test-model", "2026-01-01T00:00:00Z".to_string());
        let first_json = serde_json::to_string_pretty(&first).unwrap();
        let second_json = serde_json::to_string_pretty(&second).unwrap();
        assert_eq!(first_json, second_json);
    }
}
