//! Corpus processing error types.

/// Specific error conditions for corpus enumeration and export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CorpusErrorKind {
    /// Failed to read the corpus directory
    #[display("Failed to read corpus directory: {}", _0)]
    DirectoryRead(String),
    /// Failed to read a document file
    #[display("Failed to read document: {}", _0)]
    DocumentRead(String),
    /// Failed to serialize the corpus summary
    #[display("Failed to serialize summary: {}", _0)]
    Serialize(String),
    /// Failed to write the export artifact
    #[display("Failed to write export artifact: {}", _0)]
    ArtifactWrite(String),
}

/// Error type for corpus operations.
///
/// # Examples
///
/// ```
/// use fabula_error::{CorpusError, CorpusErrorKind};
///
/// let err = CorpusError::new(CorpusErrorKind::DocumentRead("book_1.txt".into()));
/// assert!(format!("{}", err).contains("book_1.txt"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Corpus Error: {} at line {} in {}", kind, line, file)]
pub struct CorpusError {
    /// The specific error condition
    pub kind: CorpusErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl CorpusError {
    /// Create a new CorpusError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CorpusErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
