//! Trait definitions for language model backends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod request;
mod traits;
mod types;

pub use request::{GenerateRequest, GenerateResponse};
pub use traits::LanguageModel;
pub use types::GatewayStatus;
