//! Fits the intent model and writes the artifact bundle.

use std::path::Path;

use log::{debug, info};

use crate::config::TrainingConfig;
use crate::error::{NluError, Result};
use crate::intent::{ArtifactBundle, LabelTable, LogisticRegression, TfIdfVectorizer};
use crate::training::examples::{IntentExamples, IntentSample};

/// Result of [`Trainer::train_to_dir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingOutcome {
    /// A new bundle was fitted and written.
    Trained { labels: usize, samples: usize },
    /// The directory already held a complete bundle; nothing was written.
    Skipped,
}

/// Trains TF-IDF + logistic-regression intent models.
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Fit a bundle in memory from an examples document.
    pub fn train(&self, examples: &IntentExamples) -> Result<ArtifactBundle> {
        self.train_samples(&examples.samples())
    }

    /// Fit a bundle in memory from flat training pairs.
    pub fn train_samples(&self, samples: &[IntentSample]) -> Result<ArtifactBundle> {
        self.config.validate()?;

        if samples.is_empty() {
            return Err(NluError::model("no training examples"));
        }

        let labels = LabelTable::from_labels(samples.iter().map(|s| s.intent.as_str()));
        if labels.len() < 2 {
            return Err(NluError::model(format!(
                "training needs at least two distinct intents, found {}",
                labels.len()
            )));
        }

        let targets = samples
            .iter()
            .map(|s| {
                labels
                    .index_of(&s.intent)
                    .ok_or_else(|| NluError::model(format!("unknown intent {:?}", s.intent)))
            })
            .collect::<Result<Vec<usize>>>()?;
        let texts: Vec<String> = samples.iter().map(|s| s.query.clone()).collect();

        let mut vectorizer = TfIdfVectorizer::new(self.config.analyzer.clone())?;
        let features = vectorizer.fit_transform(&texts)?;
        debug!(
            "vectorized {} samples into {} features",
            texts.len(),
            vectorizer.vocabulary_size()
        );

        let model = LogisticRegression::fit(&features, &targets, labels.len(), &self.config)?;
        info!(
            "trained intent model: {} labels, {} samples, {} epochs",
            labels.len(),
            samples.len(),
            self.config.epochs
        );

        ArtifactBundle::new(vectorizer, model, labels)
    }

    /// Train and write the bundle to `out_dir`.
    ///
    /// A directory that already holds a complete bundle is left untouched.
    /// Otherwise stray artifact files from an earlier interrupted run are
    /// removed before the new bundle is written.
    pub fn train_to_dir<P: AsRef<Path>>(
        &self,
        examples: &IntentExamples,
        out_dir: P,
    ) -> Result<TrainingOutcome> {
        let out_dir = out_dir.as_ref();
        if ArtifactBundle::is_complete(out_dir) {
            info!(
                "model already exists in {}, skipping training",
                out_dir.display()
            );
            return Ok(TrainingOutcome::Skipped);
        }

        ArtifactBundle::remove_files(out_dir)?;

        let bundle = self.train(examples)?;
        bundle.save(out_dir)?;

        Ok(TrainingOutcome::Trained {
            labels: bundle.labels.len(),
            samples: examples.example_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::intent::{IntentScorer, MODEL_FILE, TrainedIntentScorer};

    fn examples() -> IntentExamples {
        IntentExamples::from_json_str(
            r#"{"intents": {
                "check_balance": {"examples": ["what is my balance", "show available funds"]},
                "transfer_money": {"examples": ["transfer money to savings", "send 500 to wallet"]},
                "transaction_status": {"examples": ["status of my transaction", "check utr status"]}
            }}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_train_in_memory() {
        let bundle = Trainer::default().train(&examples()).unwrap();

        assert_eq!(
            bundle.labels.labels(),
            &["check_balance", "transaction_status", "transfer_money"]
        );
        let scorer = TrainedIntentScorer::new(bundle);
        let top = scorer.predict("transfer money please", 1).unwrap();
        assert_eq!(top[0].label, "transfer_money");
    }

    #[test]
    fn test_train_rejects_degenerate_input() {
        let trainer = Trainer::default();
        assert!(trainer.train(&IntentExamples::new()).is_err());

        let mut single = IntentExamples::new();
        single.insert("only", ["one intent"]).unwrap();
        let err = trainer.train(&single).unwrap_err();
        assert!(err.to_string().contains("two distinct intents"));
    }

    #[test]
    fn test_train_rejects_invalid_config() {
        let config = TrainingConfig {
            epochs: 0,
            ..TrainingConfig::default()
        };
        assert!(matches!(
            Trainer::new(config).train(&examples()),
            Err(NluError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_train_to_dir_then_skip() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("model");
        let trainer = Trainer::default();

        let outcome = trainer.train_to_dir(&examples(), &out_dir).unwrap();
        assert_eq!(
            outcome,
            TrainingOutcome::Trained {
                labels: 3,
                samples: 6
            }
        );
        assert!(ArtifactBundle::is_complete(&out_dir));

        let before = fs::read(out_dir.join(MODEL_FILE)).unwrap();
        let outcome = trainer.train_to_dir(&examples(), &out_dir).unwrap();
        assert_eq!(outcome, TrainingOutcome::Skipped);
        assert_eq!(fs::read(out_dir.join(MODEL_FILE)).unwrap(), before);
    }

    #[test]
    fn test_train_to_dir_replaces_partial_bundle() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MODEL_FILE), b"stale").unwrap();

        let outcome = Trainer::default()
            .train_to_dir(&examples(), dir.path())
            .unwrap();
        assert!(matches!(outcome, TrainingOutcome::Trained { .. }));
        assert!(TrainedIntentScorer::load(dir.path()).is_ok());
    }
}
