//! End-to-end analysis of one user message.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::NluConfig;
use crate::entity::{EntityExtractor, ExtractedEntity};
use crate::error::Result;
use crate::intent::{IntentPrediction, IntentScorer, ModelLoader};

/// Intents and entities found in one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NluAnalysis {
    pub text: String,
    pub intents: Vec<IntentPrediction>,
    pub entities: Vec<ExtractedEntity>,
    /// Name of the scorer that produced `intents`.
    pub scorer: String,
}

impl NluAnalysis {
    /// Highest-ranked intent, if any.
    pub fn top_intent(&self) -> Option<&IntentPrediction> {
        self.intents.first()
    }
}

/// Runs entity extraction and intent scoring over the same text.
///
/// Both parts are immutable after construction, so an engine can be shared
/// between threads by reference.
#[derive(Clone)]
pub struct NluEngine {
    extractor: EntityExtractor,
    scorer: Arc<dyn IntentScorer>,
}

impl std::fmt::Debug for NluEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NluEngine")
            .field("rules", &self.extractor.rules().len())
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

impl NluEngine {
    pub fn new(extractor: EntityExtractor, scorer: Arc<dyn IntentScorer>) -> Self {
        Self { extractor, scorer }
    }

    /// Default extractor plus the scorer found in `config.model_dir`.
    pub fn from_config(config: &NluConfig) -> Result<Self> {
        let scorer = ModelLoader::new(&config.model_dir).load()?;
        Ok(Self::new(EntityExtractor::new(), scorer))
    }

    pub fn extractor(&self) -> &EntityExtractor {
        &self.extractor
    }

    pub fn scorer(&self) -> &Arc<dyn IntentScorer> {
        &self.scorer
    }

    /// Rank up to `top_k` intents and extract entities from `text`.
    pub fn analyze(&self, text: &str, top_k: usize) -> Result<NluAnalysis> {
        let intents = self.scorer.predict(text, top_k)?;
        let entities = self.extractor.extract(text);
        debug!(
            "analyzed {:?}: {} intents, {} entities",
            text,
            intents.len(),
            entities.len()
        );

        Ok(NluAnalysis {
            text: text.to_string(),
            intents,
            entities,
            scorer: self.scorer.name().to_string(),
        })
    }
}
