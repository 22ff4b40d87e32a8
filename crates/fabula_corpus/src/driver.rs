//! Corpus-level analysis driver.

use crate::summarize;
use fabula_analysis::StoryAnalyzer;
use fabula_core::{CorpusSummary, Document, DocumentResult};
use fabula_error::{CorpusError, CorpusErrorKind, FabulaResult};
use fabula_models::Gateway;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Persistence hook invoked after every successfully analyzed document.
///
/// Decoupled from the aggregator so tests can exercise summarization
/// without touching storage.
pub trait Checkpoint: Send + Sync {
    /// Persist the current full summary, overwriting any previous artifact.
    fn persist(&self, summary: &CorpusSummary) -> FabulaResult<()>;
}

/// Walks a corpus directory and analyzes every document in order.
///
/// Documents are processed one at a time in sorted filename order. A
/// document that fails to load or analyze is skipped with a diagnostic;
/// the run continues. After every successful document the accumulated
/// mapping is summarized and handed to the checkpoint, so interrupting
/// the run preserves a valid artifact covering a strict prefix of the
/// corpus.
pub struct CorpusDriver<'a> {
    gateway: &'a Gateway,
    checkpoint: Option<Box<dyn Checkpoint>>,
    cancel: Arc<AtomicBool>,
}

impl<'a> CorpusDriver<'a> {
    /// Create a driver with no persistence hook.
    pub fn new(gateway: &'a Gateway) -> Self {
        Self {
            gateway,
            checkpoint: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Attach a persistence hook.
    pub fn with_checkpoint(mut self, checkpoint: Box<dyn Checkpoint>) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Shareable cancellation flag; set to `true` to stop the run between
    /// documents. The most recently persisted artifact remains valid.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Analyze every text document under `corpus_dir`.
    ///
    /// With a sample size, only the first N documents in sorted order are
    /// processed. Documents yielding zero scenes are omitted from the
    /// result, not recorded as errors.
    ///
    /// # Errors
    ///
    /// Fails only if the corpus directory itself cannot be enumerated.
    #[instrument(skip(self), fields(corpus = %corpus_dir.display()))]
    pub async fn run(
        &self,
        corpus_dir: &Path,
        sample_size: Option<usize>,
    ) -> FabulaResult<BTreeMap<String, DocumentResult>> {
        let mut files = list_text_files(corpus_dir)?;
        if let Some(n) = sample_size {
            if n < files.len() {
                info!(sample = n, total = files.len(), "Sampling corpus");
                files.truncate(n);
            }
        }

        info!(documents = files.len(), "Starting corpus run");

        let analyzer = StoryAnalyzer::new(self.gateway);
        let mut results = BTreeMap::new();

        for path in &files {
            if self.cancel.load(Ordering::SeqCst) {
                info!("Cancellation requested, stopping corpus run");
                break;
            }

            let book_id = match path.file_stem() {
                Some(stem) => stem.to_string_lossy().into_owned(),
                None => continue,
            };

            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    warn!(book_id = %book_id, error = %e, "Failed to read document, skipping");
                    continue;
                }
            };

            let document = Document::new(book_id.clone(), text.trim());
            let analysis = match analyzer.analyze(&document).await {
                Ok(analysis) => analysis,
                Err(e) => {
                    warn!(book_id = %book_id, error = %e, "Document analysis failed, skipping");
                    continue;
                }
            };

            if analysis.scenes.is_empty() {
                info!(book_id = %book_id, "Document produced no scenes, omitting");
                continue;
            }

            let result = DocumentResult::new(
                document.book_id.clone(),
                document.title.clone(),
                analysis.scenes,
                analysis.goals,
                analysis.conflicts,
            );
            info!(
                book_id = %book_id,
                scenes = result.scene_count,
                goals = result.goal_count,
                conflicts = result.conflict_count,
                "Document analyzed"
            );
            results.insert(document.book_id.clone(), result);

            self.persist(&results);
        }

        info!(books = results.len(), "Corpus run complete");
        Ok(results)
    }

    /// Summarize and persist the accumulated mapping, if a checkpoint is
    /// attached. Persistence failures are diagnosed but never end the run;
    /// the artifact is a rebuildable derived view.
    fn persist(&self, results: &BTreeMap<String, DocumentResult>) {
        let Some(checkpoint) = &self.checkpoint else {
            return;
        };
        let summary = summarize(results, self.gateway.model());
        if let Err(e) = checkpoint.persist(&summary) {
            warn!(error = %e, "Failed to persist corpus summary");
        }
    }
}

/// Enumerate `.txt` files in a directory, sorted by filename for a
/// deterministic, reproducible run order.
fn list_text_files(corpus_dir: &Path) -> FabulaResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(corpus_dir).map_err(|e| {
        CorpusError::new(CorpusErrorKind::DirectoryRead(format!(
            "{}: {}",
            corpus_dir.display(),
            e
        )))
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map(|ext| ext == "txt").unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}
