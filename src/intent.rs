//! Intent scoring for banking requests.
//!
//! Two interchangeable strategies implement the [`IntentScorer`] trait:
//! - [`KeywordIntentScorer`]: counts trigger-word hits, needs no training and
//!   always has an answer thanks to a built-in default model
//! - [`TrainedIntentScorer`]: TF-IDF features fed to a multinomial logistic
//!   regression fitted by [`crate::training`]
//!
//! [`ModelLoader`] decides which one to use for a model directory. Both
//! return [`IntentPrediction`]s tagged with a [`ScoreKind`] so callers can tell
//! hit counts from probabilities.
//!
//! # Example
//!
//! ```rust,no_run
//! use bankbot_nlu::intent::ModelLoader;
//!
//! # fn main() -> bankbot_nlu::error::Result<()> {
//! let scorer = ModelLoader::new("models/intent_model").load()?;
//! for prediction in scorer.predict("what is my account balance", 3)? {
//!     println!("{} {:.3} ({})", prediction.label, prediction.score, prediction.kind);
//! }
//! # Ok(())
//! # }
//! ```

mod artifacts;
mod keyword_scorer;
mod loader;
mod logistic;
mod scorer;
mod tfidf;
mod trained_scorer;
mod types;

pub use artifacts::{
    ARTIFACT_FILES, ArtifactBundle, LABELS_FILE, LabelTable, MODEL_FILE, VECTORIZER_FILE,
};
pub use keyword_scorer::{KEYWORD_EPSILON, KeywordIntentScorer, KeywordModel};
pub use loader::{KEYWORD_CONFIG_FILE, ModelLoader};
pub use logistic::LogisticRegression;
pub use scorer::IntentScorer;
pub use tfidf::TfIdfVectorizer;
pub use trained_scorer::TrainedIntentScorer;
pub use types::{IntentPrediction, ScoreKind};
