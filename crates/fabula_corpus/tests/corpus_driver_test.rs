// Integration tests: corpus enumeration, partial-failure tolerance, and
// incremental artifact persistence.

use async_trait::async_trait;
use fabula_corpus::{summarize_at, CorpusDriver, JsonExporter};
use fabula_error::FabulaResult;
use fabula_interface::{GenerateRequest, GenerateResponse, LanguageModel};
use fabula_models::{Gateway, ProviderKind};
use std::path::Path;

/// Always segments one scene per chapter and finds one goal, no conflicts.
struct SingleSceneModel;

#[async_trait]
impl LanguageModel for SingleSceneModel {
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<GenerateResponse> {
        let response = if req.prompt.contains("Identify the narrator") {
            r#"{"narrator": "Stacey", "confidence": "high", "evidence": "I said"}"#
        } else if req.prompt.contains("identify scene breaks") {
            r#"{"scenes": [{"scene_id": "scene_1", "description": "all of it", "text": "the whole chapter"}]}"#
        } else if req.prompt.contains("Analyze character goals") {
            r#"{"goals": [{"character": "Stacey", "goal": "fit in", "evidence": "quote", "category": "social", "is_narrator": true}]}"#
        } else {
            r#"{"conflicts": []}"#
        };
        Ok(GenerateResponse::new(response))
    }

    fn provider_name(&self) -> &'static str {
        "test"
    }

    fn model_name(&self) -> &str {
        "single-scene"
    }
}

fn gateway() -> Gateway {
    Gateway::from_backend(Box::new(SingleSceneModel), ProviderKind::Ollama)
}

fn write_story(dir: &Path, name: &str) {
    let text = format!("A story in {name} long enough to analyze in one pass.");
    std::fs::write(dir.join(name), text).unwrap();
}

/// A corpus of 5 documents where document 3 fails to load yields results
/// for the other 4, and the persisted artifact reflects exactly those.
#[tokio::test]
async fn unreadable_document_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["book_1.txt", "book_2.txt", "book_4.txt", "book_5.txt"] {
        write_story(dir.path(), name);
    }
    // book_3 is not valid UTF-8 and fails to load as text.
    std::fs::write(dir.path().join("book_3.txt"), [0xff, 0xfe, 0x00, 0x01]).unwrap();

    let artifact = dir.path().join("summary.json");
    let exporter = JsonExporter::new(&artifact);
    let gateway = gateway();
    let driver = CorpusDriver::new(&gateway).with_checkpoint(Box::new(exporter));

    let results = driver.run(dir.path(), None).await.unwrap();

    let expected: Vec<&str> = vec!["book_1", "book_2", "book_4", "book_5"];
    assert_eq!(results.keys().collect::<Vec<_>>(), expected);

    let persisted = JsonExporter::new(&artifact).load().unwrap();
    assert_eq!(persisted.metadata.total_books, 4);
    assert_eq!(persisted.books.keys().collect::<Vec<_>>(), expected);
}

#[tokio::test]
async fn sample_size_limits_documents_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["c.txt", "a.txt", "b.txt"] {
        write_story(dir.path(), name);
    }

    let gateway = gateway();
    let driver = CorpusDriver::new(&gateway);
    let results = driver.run(dir.path(), Some(2)).await.unwrap();

    assert_eq!(results.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[tokio::test]
async fn non_text_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_story(dir.path(), "story.txt");
    std::fs::write(dir.path().join("notes.md"), "not part of the corpus").unwrap();

    let gateway = gateway();
    let driver = CorpusDriver::new(&gateway);
    let results = driver.run(dir.path(), None).await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(results.contains_key("story"));
}

#[tokio::test]
async fn cancellation_stops_before_processing() {
    let dir = tempfile::tempdir().unwrap();
    write_story(dir.path(), "book_1.txt");

    let gateway = gateway();
    let driver = CorpusDriver::new(&gateway);
    driver
        .cancel_flag()
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let results = driver.run(dir.path(), None).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn missing_directory_is_a_run_level_error() {
    let gateway = gateway();
    let driver = CorpusDriver::new(&gateway);
    let missing = Path::new("/nonexistent/corpus/dir");
    assert!(driver.run(missing, None).await.is_err());
}

/// Round-trip: exporting a summary and reloading it preserves all counts
/// and records.
#[tokio::test]
async fn export_round_trip_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    write_story(dir.path(), "book_1.txt");
    write_story(dir.path(), "book_2.txt");

    let gateway = gateway();
    let driver = CorpusDriver::new(&gateway);
    let results = driver.run(dir.path(), None).await.unwrap();

    let summary = summarize_at(&results, "single-scene", "2026-01-01T00:00:00Z".to_string());

    let artifact = dir.path().join("roundtrip.json");
    let exporter = JsonExporter::new(&artifact);
    fabula_corpus::Checkpoint::persist(&exporter, &summary).unwrap();

    let reloaded = exporter.load().unwrap();
    assert_eq!(reloaded, summary);
}

#[test]
fn artifact_path_includes_corpus_and_model() {
    let exporter = JsonExporter::for_corpus(Path::new("/data/clean_corpus"), "gpt-oss:latest");
    assert_eq!(
        exporter.path().to_string_lossy(),
        "clean_corpus_gpt-oss:latest_visualization.json"
    );
}
