//! # bankbot-nlu
//!
//! Intent scoring and entity extraction for free-text banking requests.
//!
//! ## Features
//!
//! - Rule-based extraction of transaction ids, account numbers, amounts and
//!   source/destination account classes
//! - Keyword intent scoring with a built-in default model
//! - TF-IDF + logistic-regression intent classifier with a trainer and a
//!   three-file artifact bundle
//! - Reader/writer for intent-examples documents
//! - `bankbot` command-line tool
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use bankbot_nlu::engine::NluEngine;
//! use bankbot_nlu::entity::EntityExtractor;
//! use bankbot_nlu::intent::KeywordIntentScorer;
//!
//! let engine = NluEngine::new(
//!     EntityExtractor::new(),
//!     Arc::new(KeywordIntentScorer::builtin()),
//! );
//! let analysis = engine.analyze("send rs. 2000 from salary to wallet", 3).unwrap();
//!
//! assert_eq!(analysis.top_intent().unwrap().label, "transfer_money");
//! assert_eq!(analysis.entities.len(), 3);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod intent;
pub mod training;

pub mod prelude {
    pub use crate::config::{NluConfig, TrainingConfig};
    pub use crate::engine::{NluAnalysis, NluEngine};
    pub use crate::entity::{EntityExtractor, EntityType, ExtractedEntity};
    pub use crate::error::{NluError, Result};
    pub use crate::intent::{
        IntentPrediction, IntentScorer, KeywordIntentScorer, ModelLoader, ScoreKind,
        TrainedIntentScorer,
    };
    pub use crate::training::{IntentExamples, Trainer, TrainingOutcome};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
