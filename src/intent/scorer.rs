//! Intent scorer trait definition.

use crate::error::Result;
use crate::intent::types::{IntentPrediction, ScoreKind};

/// Ranks the known intents for a piece of text.
///
/// Implementations hold only data fixed at construction, so one instance can
/// be shared behind an `Arc` by any number of threads.
pub trait IntentScorer: Send + Sync {
    /// Rank intents for `text`, highest score first.
    ///
    /// # Arguments
    /// * `text` - The raw user message
    /// * `top_k` - Maximum number of predictions; values above the number of
    ///   known intents return every intent, `0` returns nothing
    fn predict(&self, text: &str, top_k: usize) -> Result<Vec<IntentPrediction>>;

    /// The intents this scorer can return, in model order.
    fn labels(&self) -> Vec<String>;

    /// The meaning of the scores this scorer produces.
    fn score_kind(&self) -> ScoreKind;

    /// Get the name of this scorer for debugging and logging.
    fn name(&self) -> &str;
}
