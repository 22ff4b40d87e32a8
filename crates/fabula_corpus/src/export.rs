//! Incremental JSON artifact export.

use crate::Checkpoint;
use fabula_core::CorpusSummary;
use fabula_error::{CorpusError, CorpusErrorKind, FabulaResult};
use std::path::{Path, PathBuf};

/// Writes the corpus summary to a pretty-printed JSON file.
///
/// The file is overwritten wholesale at each persistence point using a
/// temp-file + rename sequence, so a reader never observes a partial
/// artifact even if the process dies mid-write.
pub struct JsonExporter {
    path: PathBuf,
}

impl JsonExporter {
    /// Create an exporter writing to an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create an exporter with the conventional artifact path for a corpus
    /// directory and model: `{dir_name}_{model}_visualization.json` in the
    /// current working directory, so runs under different models or corpora
    /// do not collide.
    pub fn for_corpus(corpus_dir: &Path, model: &str) -> Self {
        let dir_name = corpus_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "corpus".to_string());
        Self::new(format!("{dir_name}_{model}_visualization.json"))
    }

    /// Path of the exported artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load a previously exported summary.
    ///
    /// # Errors
    ///
    /// Fails if the artifact cannot be read or parsed.
    pub fn load(&self) -> FabulaResult<CorpusSummary> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            CorpusError::new(CorpusErrorKind::DocumentRead(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;
        let summary = serde_json::from_str(&content)
            .map_err(|e| CorpusError::new(CorpusErrorKind::Serialize(e.to_string())))?;
        Ok(summary)
    }
}

impl Checkpoint for JsonExporter {
    fn persist(&self, summary: &CorpusSummary) -> FabulaResult<()> {
        let json = serde_json::to_string_pretty(summary)
            .map_err(|e| CorpusError::new(CorpusErrorKind::Serialize(e.to_string())))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, json).map_err(|e| {
            CorpusError::new(CorpusErrorKind::ArtifactWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            CorpusError::new(CorpusErrorKind::ArtifactWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;

        tracing::debug!(
            path = %self.path.display(),
            books = summary.metadata.total_books,
            "Persisted corpus summary"
        );

        Ok(())
    }
}
