//! Character goal records.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Closed vocabulary of goal categories.
///
/// Model responses occasionally invent categories; parse with
/// [`GoalCategory::from_label`] to fold anything unrecognized into
/// [`GoalCategory::Other`].
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
pub enum GoalCategory {
    /// Friendships, popularity, social standing
    Social,
    /// Family relationships and obligations
    Family,
    /// Personal growth, identity, self-image
    Personal,
    /// School and academics
    Academic,
    /// Babysitting jobs and club business
    Babysitting,
    /// Anything else
    Other,
}

impl GoalCategory {
    /// Parse a model-supplied label, falling back to `Other`.
    pub fn from_label(label: &str) -> Self {
        Self::from_str(label.trim()).unwrap_or(Self::Other)
    }
}

/// A character's stated or implied objective within a scene.
///
/// Never mutated after creation; many goals may share a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Identifier, `{scene_id}_goal_{n}`
    pub goal_id: String,
    /// Owning scene identifier
    pub scene_id: String,
    /// Owning document identifier
    pub book_id: String,
    /// Character holding the goal
    pub character: String,
    /// What the character wants to achieve
    pub goal_text: String,
    /// Goal category
    pub category: GoalCategory,
    /// Verbatim excerpt of the scene text supporting the goal
    pub evidence: String,
    /// Extraction confidence score
    pub confidence: f32,
}
