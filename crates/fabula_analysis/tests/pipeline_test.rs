// Integration tests: the full segment -> goals -> conflicts pipeline
// driven by a scripted in-memory model.

use async_trait::async_trait;
use fabula_analysis::{SceneAnalyzer, StoryAnalyzer};
use fabula_core::{Document, Scene};
use fabula_error::FabulaResult;
use fabula_interface::{GenerateRequest, GenerateResponse, LanguageModel};
use fabula_models::{Gateway, ProviderKind};

/// Routes prompts to canned responses by recognizing the prompt family.
struct ScriptedModel {
    narrator_response: String,
    scenes_response: String,
    goals_response: String,
    conflicts_response: String,
}

impl Default for ScriptedModel {
    fn default() -> Self {
        Self {
            narrator_response: r#"{"narrator": "Kristy", "confidence": "high", "evidence": "I said"}"#
                .to_string(),
            scenes_response: String::new(),
            goals_response: String::new(),
            conflicts_response: String::new(),
        }
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<GenerateResponse> {
        let response = if req.prompt.contains("Identify the narrator") {
            &self.narrator_response
        } else if req.prompt.contains("identify scene breaks") {
            &self.scenes_response
        } else if req.prompt.contains("Analyze character goals") {
            &self.goals_response
        } else if req.prompt.contains("Analyze conflicts") {
            &self.conflicts_response
        } else {
            panic!("unrecognized prompt: {}", req.prompt);
        };
        Ok(GenerateResponse::new(response.clone()))
    }

    fn provider_name(&self) -> &'static str {
        "test"
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

fn gateway(model: ScriptedModel) -> Gateway {
    Gateway::from_backend(Box::new(model), ProviderKind::Ollama)
}

fn chapter_body(sentence: &str) -> String {
    sentence.repeat(10)
}

/// Clear `Chapter N` headings and a model that always returns a
/// well-formed single-scene payload yield exactly one scene per chapter,
/// each numbered 1.
#[tokio::test]
async fn three_chapters_one_scene_each() {
    let text = format!(
        "Chapter 1\n{}\nChapter 2\n{}\nChapter 3\n{}",
        chapter_body("Kristy had her great idea at the kitchen table. "),
        chapter_body("The club met at Claudia's house after school. "),
        chapter_body("Everything went wrong at the Newtons' party. "),
    );
    let document = Document::new("great_idea", text);

    let model = ScriptedModel {
        scenes_response: r#"{"scenes": [{"scene_id": "scene_1", "description": "one scene", "text": "scene body"}]}"#
            .to_string(),
        goals_response: r#"{"goals": []}"#.to_string(),
        conflicts_response: r#"{"conflicts": []}"#.to_string(),
        ..ScriptedModel::default()
    };
    let gateway = gateway(model);

    let analysis = StoryAnalyzer::new(&gateway)
        .analyze(&document)
        .await
        .unwrap();

    assert_eq!(analysis.scenes.len(), 3);
    for (i, scene) in analysis.scenes.iter().enumerate() {
        assert_eq!(scene.chapter_num, (i + 1) as u32);
        assert_eq!(scene.scene_num, 1);
        assert_eq!(
            scene.scene_id,
            format!("great_idea_chapter_{}_scene_1", i + 1)
        );
        assert_eq!(scene.narrator.as_deref(), Some("Kristy"));
    }
}

/// No chapter headings and an unparseable segmentation response
/// yield exactly one scene spanning the whole text, chapter 1.
#[tokio::test]
async fn unparseable_segmentation_falls_back_to_one_scene() {
    let text = "A story without any chapter headings at all, told in one breath.";
    let document = Document::new("one_breath", text);

    let model = ScriptedModel {
        narrator_response: "I have no idea who narrates this.".to_string(),
        scenes_response: "I could not find any scene breaks, sorry!".to_string(),
        goals_response: r#"{"goals": []}"#.to_string(),
        conflicts_response: r#"{"conflicts": []}"#.to_string(),
    };
    let gateway = gateway(model);

    let analysis = StoryAnalyzer::new(&gateway)
        .analyze(&document)
        .await
        .unwrap();

    assert_eq!(analysis.scenes.len(), 1);
    let scene = &analysis.scenes[0];
    assert_eq!(scene.chapter_num, 1);
    assert_eq!(scene.scene_num, 1);
    assert_eq!(scene.scene_id, "one_breath_chapter_1_scene_1");
    assert_eq!(scene.text, text);
    assert_eq!(scene.narrator, None);
    assert_eq!(scene.start_paragraph, Some(0));
    assert_eq!(scene.end_paragraph, Some(0));
}

/// An empty goal-extraction response yields no goals, and
/// conflict extraction still proceeds with an empty goals context.
#[tokio::test]
async fn empty_goal_response_does_not_block_conflicts() {
    let document = Document::new("schedule_fight", "Two friends argued about the schedule.");

    let model = ScriptedModel {
        scenes_response: r#"{"scenes": [{"scene_id": "scene_1", "description": "argument", "text": "Two friends argued."}]}"#
            .to_string(),
        goals_response: String::new(),
        conflicts_response: r#"{"conflicts": [{
            "characters_involved": ["Mary Anne", "Dawn"],
            "conflict_type": "disagreement",
            "description": "They disagree about the sitting schedule",
            "evidence": "argued about the schedule",
            "severity": "low",
            "involves_narrator": false
        }]}"#
            .to_string(),
        ..ScriptedModel::default()
    };
    let gateway = gateway(model);

    let analysis = StoryAnalyzer::new(&gateway)
        .analyze(&document)
        .await
        .unwrap();

    assert!(analysis.goals.is_empty());
    assert_eq!(analysis.conflicts.len(), 1);
    let conflict = &analysis.conflicts[0];
    assert!(conflict.goals_affected.is_empty());
    assert_eq!(conflict.characters_involved.len(), 2);
}

/// goals_affected only links goals whose character is among the
/// conflict's involved characters, within the same scene.
#[tokio::test]
async fn goals_affected_filters_by_involved_characters() {
    let scene = Scene::new("bake_sale_chapter_1", "bake_sale", 1, 1, "A and C want things; A and B clash.");

    let model = ScriptedModel {
        goals_response: r#"{"goals": [
            {"character": "A", "goal": "win the bake sale", "evidence": "A wanted to win", "category": "social", "is_narrator": false},
            {"character": "C", "goal": "finish homework", "evidence": "C needed to study", "category": "academic", "is_narrator": false}
        ]}"#
        .to_string(),
        conflicts_response: r#"{"conflicts": [{
            "characters_involved": ["A", "B"],
            "conflict_type": "rivalry",
            "description": "A and B compete",
            "evidence": "A and B clash",
            "involves_narrator": false
        }]}"#
            .to_string(),
        ..ScriptedModel::default()
    };
    let gateway = gateway(model);
    let analyzer = SceneAnalyzer::new(&gateway);

    let goals = analyzer.extract_goals(&scene).await.unwrap();
    assert_eq!(goals.len(), 2);

    let conflicts = analyzer.extract_conflicts(&scene, &goals).await.unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(
        conflicts[0].goals_affected,
        vec!["bake_sale_chapter_1_scene_1_goal_1".to_string()]
    );
}

/// Goals from a different scene are never linked, even for involved characters.
#[tokio::test]
async fn goals_affected_ignores_other_scenes() {
    let scene = Scene::new("book_chapter_1", "book", 1, 2, "B and A keep arguing.");

    // A goal for "A" that belongs to a different scene.
    let model = ScriptedModel {
        goals_response: r#"{"goals": [
            {"character": "A", "goal": "make peace", "evidence": "A sighed", "category": "personal", "is_narrator": false}
        ]}"#
        .to_string(),
        conflicts_response: r#"{"conflicts": [{
            "characters_involved": ["A", "B"],
            "conflict_type": "disagreement",
            "description": "Still arguing",
            "evidence": "keep arguing",
            "involves_narrator": false
        }]}"#
            .to_string(),
        ..ScriptedModel::default()
    };
    let gateway = gateway(model);
    let analyzer = SceneAnalyzer::new(&gateway);

    let other_scene = Scene::new("book_chapter_1", "book", 1, 1, "Elsewhere.");
    let foreign_goals = analyzer.extract_goals(&other_scene).await.unwrap();
    assert_eq!(foreign_goals.len(), 1);

    let conflicts = analyzer
        .extract_conflicts(&scene, &foreign_goals)
        .await
        .unwrap();
    assert_eq!(conflicts.len(), 1);
    assert!(conflicts[0].goals_affected.is_empty());
}

/// Unknown category and conflict-type labels fold into `Other`.
#[tokio::test]
async fn unknown_labels_fold_into_other() {
    let scene = Scene::new("book_chapter_1", "book", 1, 1, "Strange happenings.");

    let model = ScriptedModel {
        goals_response: r#"{"goals": [
            {"character": "X", "goal": "transcend", "evidence": "X stared", "category": "metaphysical", "is_narrator": false}
        ]}"#
        .to_string(),
        conflicts_response: r#"{"conflicts": [{
            "characters_involved": ["X", "Y"],
            "conflict_type": "existential dread",
            "description": "Unclassifiable",
            "evidence": "Strange happenings",
            "involves_narrator": false
        }]}"#
            .to_string(),
        ..ScriptedModel::default()
    };
    let gateway = gateway(model);
    let analyzer = SceneAnalyzer::new(&gateway);

    let goals = analyzer.extract_goals(&scene).await.unwrap();
    assert_eq!(goals[0].category, fabula_core::GoalCategory::Other);

    let conflicts = analyzer.extract_conflicts(&scene, &goals).await.unwrap();
    assert_eq!(conflicts[0].conflict_type, fabula_core::ConflictKind::Other);
    assert_eq!(conflicts[0].severity, fabula_core::Severity::Medium);
}
