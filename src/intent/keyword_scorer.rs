//! Keyword-based intent scorer.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{NluError, Result};
use crate::intent::scorer::IntentScorer;
use crate::intent::types::{IntentPrediction, ScoreKind};

/// Added to every keyword score so zero-hit intents stay strictly positive.
pub const KEYWORD_EPSILON: f64 = 1e-6;

/// Ordered mapping from intent label to trigger words.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordModel {
    intents: Vec<String>,
    keywords: Vec<(String, Vec<String>)>,
}

/// On-disk shape: `{"intents": [...], "keywords": {"intent": ["word", ...]}}`.
#[derive(Deserialize)]
struct KeywordDocument {
    #[serde(default)]
    intents: Vec<String>,
    #[serde(default)]
    keywords: Map<String, Value>,
}

impl KeywordModel {
    /// Build a model from `(intent, trigger words)` pairs. The declared intent
    /// list is the keys, in the given order.
    pub fn new(keywords: Vec<(String, Vec<String>)>) -> Self {
        let intents = keywords.iter().map(|(intent, _)| intent.clone()).collect();
        Self::with_intents(intents, keywords)
    }

    fn with_intents(intents: Vec<String>, keywords: Vec<(String, Vec<String>)>) -> Self {
        let keywords = keywords
            .into_iter()
            .map(|(intent, words)| {
                let words = words
                    .into_iter()
                    .map(|w| w.trim().to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect();
                (intent, words)
            })
            .collect();
        Self { intents, keywords }
    }

    /// The built-in three-intent model used when no configuration is usable.
    pub fn builtin() -> Self {
        let entry = |intent: &str, words: &[&str]| {
            (
                intent.to_string(),
                words.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
            )
        };

        Self::new(vec![
            entry(
                "transfer_money",
                &["transfer", "send", "pay", "deposit"],
            ),
            entry("check_balance", &["balance", "available", "funds"]),
            entry(
                "transaction_status",
                &["txn", "transaction", "status", "utr"],
            ),
        ])
    }

    /// Parse a keyword configuration document.
    ///
    /// Fails if the document is not valid JSON, if a keyword entry is not a
    /// list of strings, or if no intent has keywords.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let document: KeywordDocument = serde_json::from_str(content)?;

        let mut keywords = Vec::with_capacity(document.keywords.len());
        for (intent, words) in document.keywords {
            let words: Vec<String> = serde_json::from_value(words).map_err(|e| {
                NluError::invalid_config(format!(
                    "keywords for intent {intent:?} must be a list of strings: {e}"
                ))
            })?;
            keywords.push((intent, words));
        }

        if keywords.is_empty() {
            return Err(NluError::invalid_config(
                "keyword configuration declares no keywords",
            ));
        }

        let intents = if document.intents.is_empty() {
            keywords.iter().map(|(intent, _)| intent.clone()).collect()
        } else {
            document.intents
        };

        Ok(Self::with_intents(intents, keywords))
    }

    /// Read a keyword configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Declared intent names.
    pub fn intents(&self) -> &[String] {
        &self.intents
    }

    /// Scored intents with their trigger words, in model order.
    pub fn keywords(&self) -> &[(String, Vec<String>)] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl Default for KeywordModel {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Scores intents by counting trigger words contained in the lower-cased text.
///
/// Matching is substring containment, so `"pay"` also matches `"payment"`.
#[derive(Debug, Clone)]
pub struct KeywordIntentScorer {
    model: KeywordModel,
}

impl KeywordIntentScorer {
    /// Create a scorer over the given model.
    pub fn new(model: KeywordModel) -> Self {
        Self { model }
    }

    /// Create a scorer over the built-in default model.
    pub fn builtin() -> Self {
        Self::new(KeywordModel::builtin())
    }

    /// Load the keyword configuration at `path`, falling back to the built-in
    /// model when it is missing or unusable. Never fails.
    pub fn from_path_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(
                "no keyword configuration at {}, using built-in intents",
                path.display()
            );
            return Self::builtin();
        }

        match KeywordModel::load(path) {
            Ok(model) => {
                info!(
                    "loaded {} keyword intents from {}",
                    model.len(),
                    path.display()
                );
                Self::new(model)
            }
            Err(e) => {
                warn!(
                    "failed to load keyword configuration {}: {e}; using built-in intents",
                    path.display()
                );
                Self::builtin()
            }
        }
    }

    pub fn model(&self) -> &KeywordModel {
        &self.model
    }
}

impl IntentScorer for KeywordIntentScorer {
    fn predict(&self, text: &str, top_k: usize) -> Result<Vec<IntentPrediction>> {
        let lowered = text.to_lowercase();

        let mut predictions: Vec<IntentPrediction> = self
            .model
            .keywords()
            .iter()
            .map(|(intent, words)| {
                let hits = words.iter().filter(|w| lowered.contains(w.as_str())).count();
                IntentPrediction::new(
                    intent.clone(),
                    hits as f64 + KEYWORD_EPSILON,
                    ScoreKind::KeywordHits,
                )
            })
            .collect();

        // Stable sort: equal scores keep model order.
        predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
        predictions.truncate(top_k);

        debug!(
            "keyword scorer ranked {} intents, top: {:?}",
            predictions.len(),
            predictions.first().map(|p| p.label.as_str())
        );
        Ok(predictions)
    }

    fn labels(&self) -> Vec<String> {
        self.model
            .keywords()
            .iter()
            .map(|(intent, _)| intent.clone())
            .collect()
    }

    fn score_kind(&self) -> ScoreKind {
        ScoreKind::KeywordHits
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
