//! Error types for the Fabula narrative analysis pipeline.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use fabula_error::{ConfigError, ConfigErrorKind, FabulaResult};
//!
//! fn load_key() -> FabulaResult<String> {
//!     Err(ConfigError::new(ConfigErrorKind::MissingApiKey("ANTHROPIC_API_KEY".into())))?
//! }
//!
//! match load_key() {
//!     Ok(key) => println!("Got: {}", key),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod corpus;
mod error;
mod models;

pub use backend::BackendError;
pub use config::{ConfigError, ConfigErrorKind};
pub use corpus::{CorpusError, CorpusErrorKind};
pub use error::{FabulaError, FabulaErrorKind, FabulaResult};
pub use models::{ModelsError, ModelsErrorKind};
