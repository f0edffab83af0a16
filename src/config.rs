//! Configuration for inference and training.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzerConfig;
use crate::error::{NluError, Result};

/// Configuration for the NLU engine and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NluConfig {
    /// Directory holding the trained artifact bundle and/or the keyword
    /// configuration (`intents.json`).
    pub model_dir: PathBuf,
    /// Intent-examples document used for training.
    pub intents_path: PathBuf,
    /// Default number of ranked intents returned per request.
    pub top_k: usize,
    /// Training parameters.
    pub training: TrainingConfig,
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models/intent_model"),
            intents_path: PathBuf::from("data/intents.json"),
            top_k: 4,
            training: TrainingConfig::default(),
        }
    }
}

impl NluConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: NluConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(NluError::invalid_config("top_k must be at least 1"));
        }
        self.training.validate()
    }
}

/// Parameters of the logistic-regression training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Passes over the training samples.
    pub epochs: usize,
    /// Samples per gradient step.
    pub batch_size: usize,
    /// Gradient descent step size.
    pub learning_rate: f64,
    /// L2 penalty applied to the weights.
    pub l2_penalty: f64,
    /// Tokenization used by the TF-IDF vectorizer.
    pub analyzer: AnalyzerConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            batch_size: 4,
            learning_rate: 0.5,
            l2_penalty: 1e-4,
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(NluError::invalid_config("epochs must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(NluError::invalid_config("batch_size must be at least 1"));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(NluError::invalid_config(format!(
                "learning_rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        if !(self.l2_penalty >= 0.0 && self.l2_penalty.is_finite()) {
            return Err(NluError::invalid_config(format!(
                "l2_penalty must be non-negative, got {}",
                self.l2_penalty
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nlu_config_default() {
        let config = NluConfig::default();
        assert_eq!(config.model_dir, PathBuf::from("models/intent_model"));
        assert_eq!(config.top_k, 4);
        assert_eq!(config.training.epochs, 100);
        assert_eq!(config.training.batch_size, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: NluConfig =
            serde_json::from_str(r#"{"top_k": 2, "training": {"epochs": 7}}"#).unwrap();
        assert_eq!(config.top_k, 2);
        assert_eq!(config.training.epochs, 7);
        assert_eq!(config.training.batch_size, 4);
        assert_eq!(config.model_dir, PathBuf::from("models/intent_model"));
    }

    #[test]
    fn test_training_config_validation() {
        let mut config = TrainingConfig::default();
        config.epochs = 0;
        assert!(matches!(config.validate(), Err(NluError::InvalidConfig(_))));

        let mut config = TrainingConfig::default();
        config.learning_rate = -1.0;
        assert!(config.validate().is_err());

        let mut config = TrainingConfig::default();
        config.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let config = NluConfig {
            top_k: 0,
            ..NluConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
