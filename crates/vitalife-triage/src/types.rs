//! Triage types and tuning constants.

use serde::{Deserialize, Serialize};

/// Weight applied to the length of a matched symptom phrase.
pub const DIRECT_MATCH_WEIGHT: usize = 2;
/// Minimum lemmatizer similarity for a match when no phrase matched.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;
/// Minimum fuzzy score for a "did you mean" suggestion.
pub const FUZZY_CUTOFF: f64 = 0.4;
/// Direct scores above this are HIGH confidence.
pub const HIGH_CONFIDENCE_SCORE: usize = 20;
/// Related-symptom hints shown per response.
pub const MAX_RELATED_HINTS: usize = 3;
/// Suggestions shown when nothing matched.
pub const MAX_SUGGESTIONS: usize = 3;
/// Ages above this get the cardiac note on heart/chest conditions.
pub const CARDIAC_AGE_THRESHOLD: u32 = 50;

/// Coarse certainty bucket for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// How a condition was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    /// Symptom phrase found verbatim in the input.
    Direct,
    /// Lemmatizer similarity against the condition id.
    Similarity,
}

/// Scoring knobs. Defaults are the constants above.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageTuning {
    pub direct_match_weight: usize,
    pub similarity_threshold: f64,
    pub fuzzy_cutoff: f64,
    pub high_confidence_score: usize,
    pub max_related_hints: usize,
    pub max_suggestions: usize,
    pub cardiac_age_threshold: u32,
}

impl Default for TriageTuning {
    fn default() -> Self {
        Self {
            direct_match_weight: DIRECT_MATCH_WEIGHT,
            similarity_threshold: SIMILARITY_THRESHOLD,
            fuzzy_cutoff: FUZZY_CUTOFF,
            high_confidence_score: HIGH_CONFIDENCE_SCORE,
            max_related_hints: MAX_RELATED_HINTS,
            max_suggestions: MAX_SUGGESTIONS,
            cardiac_age_threshold: CARDIAC_AGE_THRESHOLD,
        }
    }
}

/// Output of the response composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub text: String,
    pub is_emergency: bool,
    pub confidence_tier: ConfidenceTier,
    pub matched_condition_id: Option<String>,
    /// Direct score, or similarity rescaled into direct-score units.
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_source: Option<MatchSource>,
    /// Keyword that tripped emergency detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// Normalizer output plus composed response for one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Canonical phrase from the normalizer, when auto-fill was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_text: Option<String>,
    pub response: ResponseRecord,
}
