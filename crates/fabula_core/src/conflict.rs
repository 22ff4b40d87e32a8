//! Interpersonal conflict records.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Closed vocabulary of conflict types.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConflictKind {
    /// Open disagreement between characters
    Disagreement,
    /// Ongoing rivalry
    Rivalry,
    /// Conflict rooted in a misunderstanding
    Misunderstanding,
    /// Characters competing for the same thing
    Competition,
    /// Anything else
    Other,
}

impl ConflictKind {
    /// Parse a model-supplied label, falling back to `Other`.
    pub fn from_label(label: &str) -> Self {
        Self::from_str(label.trim()).unwrap_or(Self::Other)
    }
}

/// Conflict severity.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// Minor friction
    Low,
    /// Noticeable tension
    #[default]
    Medium,
    /// Scene-defining conflict
    High,
}

impl Severity {
    /// Parse a model-supplied label, falling back to `Medium`.
    pub fn from_label(label: &str) -> Self {
        Self::from_str(label.trim()).unwrap_or_default()
    }
}

/// A tension or disagreement between characters within a scene.
///
/// Created after the goals of the same scene exist, so `goals_affected`
/// can reference goals whose character appears in `characters_involved`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Identifier, `{scene_id}_conflict_{n}`
    pub conflict_id: String,
    /// Owning scene identifier
    pub scene_id: String,
    /// Owning document identifier
    pub book_id: String,
    /// Conflict type
    pub conflict_type: ConflictKind,
    /// Natural-language description of the conflict
    pub description: String,
    /// Characters involved in the conflict
    pub characters_involved: Vec<String>,
    /// Identifiers of goals in the same scene held by involved characters
    pub goals_affected: Vec<String>,
    /// Verbatim excerpt of the scene text supporting the conflict
    pub evidence: String,
    /// Conflict severity
    pub severity: Severity,
    /// Model-supplied rationale, when given
    pub rationale: String,
}
