//! Training the intent model from labelled examples.
//!
//! [`IntentExamples`] reads and writes the examples document; [`Trainer`]
//! fits the vectorizer and classifier and writes the artifact bundle that
//! [`crate::intent::ModelLoader`] picks up.

mod examples;
mod trainer;

pub use examples::{IntentExamples, IntentSample};
pub use trainer::{Trainer, TrainingOutcome};
