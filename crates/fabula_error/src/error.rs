//! Top-level error wrapper types.

use crate::{BackendError, ConfigError, CorpusError, ModelsError};

/// The foundation error enum aggregating every fabula error family.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaError, BackendError};
///
/// let backend_err = BackendError::new("gateway not ready");
/// let err: FabulaError = backend_err.into();
/// assert!(format!("{}", err).contains("Backend Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FabulaErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Model provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Corpus processing error
    #[from(CorpusError)]
    Corpus(CorpusError),
}

/// Fabula error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fabula_error::{ConfigError, ConfigErrorKind, FabulaResult};
///
/// fn might_fail() -> FabulaResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::UnknownProvider("cohere".into())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fabula Error: {}", _0)]
pub struct FabulaError(Box<FabulaErrorKind>);

impl FabulaError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulaErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FabulaErrorKind
impl<T> From<T> for FabulaError
where
    T: Into<FabulaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for fabula operations.
pub type FabulaResult<T> = std::result::Result<T, FabulaError>;
