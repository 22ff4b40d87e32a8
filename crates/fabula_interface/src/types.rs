//! Shared interface types.

use serde::{Deserialize, Serialize};

/// Readiness report for a configured gateway.
///
/// # Examples
///
/// ```
/// use fabula_interface::GatewayStatus;
///
/// let status = GatewayStatus {
///     provider: "ollama".to_string(),
///     model: "gpt-oss:latest".to_string(),
///     ready: false,
/// };
/// assert!(!status.ready);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayStatus {
    /// Configured provider name
    pub provider: String,
    /// Configured model name
    pub model: String,
    /// Whether the backend initialized and can accept calls
    pub ready: bool,
}
