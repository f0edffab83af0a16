//! Common types for intent scoring.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What an [`IntentPrediction`] score means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    /// Number of trigger words found, plus a small epsilon.
    KeywordHits,
    /// Model probability in `[0, 1]`.
    Probability,
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreKind::KeywordHits => f.write_str("keyword_hits"),
            ScoreKind::Probability => f.write_str("probability"),
        }
    }
}

/// A ranked intent. Scores are only comparable between predictions of the
/// same [`ScoreKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentPrediction {
    #[serde(rename = "intent")]
    pub label: String,
    pub score: f64,
    pub kind: ScoreKind,
}

impl IntentPrediction {
    pub fn new<S: Into<String>>(label: S, score: f64, kind: ScoreKind) -> Self {
        Self {
            label: label.into(),
            score,
            kind,
        }
    }
}
