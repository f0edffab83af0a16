//! Selects the intent scorer for a model directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;

use crate::error::Result;
use crate::intent::artifacts::ArtifactBundle;
use crate::intent::keyword_scorer::KeywordIntentScorer;
use crate::intent::scorer::IntentScorer;
use crate::intent::trained_scorer::TrainedIntentScorer;

/// Keyword configuration file looked up inside the model directory.
pub const KEYWORD_CONFIG_FILE: &str = "intents.json";

/// Loads the best available scorer from a model directory.
///
/// A complete trained bundle wins; anything less yields the keyword scorer.
#[derive(Debug, Clone)]
pub struct ModelLoader {
    model_dir: PathBuf,
}

impl ModelLoader {
    pub fn new<P: AsRef<Path>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.as_ref().to_path_buf(),
        }
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Whether all three trained artifacts are present.
    pub fn has_trained_model(&self) -> bool {
        ArtifactBundle::is_complete(&self.model_dir)
    }

    /// Load the trained scorer if the bundle is complete, else the keyword
    /// scorer.
    ///
    /// Errors only come from a complete but unreadable bundle; the keyword
    /// path never fails.
    pub fn load(&self) -> Result<Arc<dyn IntentScorer>> {
        if self.has_trained_model() {
            Ok(Arc::new(self.load_trained_scorer()?))
        } else {
            info!(
                "no trained model in {}, using keyword scorer",
                self.model_dir.display()
            );
            Ok(Arc::new(self.load_keyword_scorer()))
        }
    }

    /// Keyword scorer from `<model_dir>/intents.json`, or the built-in model.
    pub fn load_keyword_scorer(&self) -> KeywordIntentScorer {
        KeywordIntentScorer::from_path_or_default(self.model_dir.join(KEYWORD_CONFIG_FILE))
    }

    pub fn load_trained_scorer(&self) -> Result<TrainedIntentScorer> {
        TrainedIntentScorer::load(&self.model_dir)
    }
}
