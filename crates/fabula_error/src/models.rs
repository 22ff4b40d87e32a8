//! Model provider error types.

/// Specific error conditions for LLM provider clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ModelsErrorKind {
    /// HTTP transport failure
    #[display("HTTP transport failed: {}", _0)]
    Http(String),
    /// Provider API returned a non-success status
    #[display("API error {}: {}", status, message)]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// Failed to parse the provider response body
    #[display("Failed to parse provider response: {}", _0)]
    Parse(String),
    /// Response contained no usable text output
    #[display("Provider response contained no text output")]
    EmptyResponse,
    /// Requested model is not available on the server
    #[display("Model not found: {}", _0)]
    ModelNotFound(String),
    /// Local model server is not reachable
    #[display("Model server unreachable at {}", _0)]
    ServerUnreachable(String),
}

/// Error type for model provider operations.
///
/// # Examples
///
/// ```
/// use fabula_error::{ModelsError, ModelsErrorKind};
///
/// let err = ModelsError::new(ModelsErrorKind::ModelNotFound("llama3".into()));
/// assert!(format!("{}", err).contains("llama3"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at line {} in {}", kind, line, file)]
pub struct ModelsError {
    /// The specific error condition
    pub kind: ModelsErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new ModelsError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
