//! Trained intent scorer backed by a TF-IDF + logistic-regression bundle.

use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::intent::artifacts::ArtifactBundle;
use crate::intent::scorer::IntentScorer;
use crate::intent::types::{IntentPrediction, ScoreKind};

/// Ranks intents by the class probabilities of a fitted model.
#[derive(Debug, Clone)]
pub struct TrainedIntentScorer {
    bundle: ArtifactBundle,
}

impl TrainedIntentScorer {
    pub fn new(bundle: ArtifactBundle) -> Self {
        Self { bundle }
    }

    /// Load the artifact bundle stored in `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Ok(Self::new(ArtifactBundle::load(dir)?))
    }

    pub fn bundle(&self) -> &ArtifactBundle {
        &self.bundle
    }
}

impl IntentScorer for TrainedIntentScorer {
    fn predict(&self, text: &str, top_k: usize) -> Result<Vec<IntentPrediction>> {
        let features = self.bundle.vectorizer.transform(text)?;
        let probabilities = self.bundle.model.predict_proba(&features)?;

        let mut ranked: Vec<(usize, f64)> = probabilities.into_iter().enumerate().collect();
        // Stable sort: equal probabilities keep ascending class index.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(top_k);

        let predictions: Vec<IntentPrediction> = ranked
            .into_iter()
            .filter_map(|(index, p)| {
                self.bundle
                    .labels
                    .label(index)
                    .map(|label| IntentPrediction::new(label, p, ScoreKind::Probability))
            })
            .collect();

        debug!(
            "trained scorer ranked {} intents, top: {:?}",
            predictions.len(),
            predictions.first().map(|p| p.label.as_str())
        );
        Ok(predictions)
    }

    fn labels(&self) -> Vec<String> {
        self.bundle.labels.labels().to_vec()
    }

    fn score_kind(&self) -> ScoreKind {
        ScoreKind::Probability
    }

    fn name(&self) -> &str {
        "trained"
    }
}
