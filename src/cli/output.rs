//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{BankbotArgs, OutputFormat};
use crate::engine::NluAnalysis;
use crate::entity::ExtractedEntity;
use crate::error::Result;
use crate::intent::{IntentPrediction, ScoreKind};
use crate::training::TrainingOutcome;

/// Result structure for entity extraction.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
    pub entities: Vec<ExtractedEntity>,
}

/// Result structure for intent prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResult {
    pub text: String,
    pub scorer: String,
    pub intents: Vec<IntentPrediction>,
}

/// Result structure for a training run.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub out_dir: String,
    pub skipped: bool,
    pub labels: usize,
    pub samples: usize,
    pub duration_ms: u64,
}

impl TrainingResult {
    pub fn new(out_dir: String, outcome: TrainingOutcome, duration_ms: u64) -> Self {
        let (skipped, labels, samples) = match outcome {
            TrainingOutcome::Trained { labels, samples } => (false, labels, samples),
            TrainingOutcome::Skipped => (true, 0, 0),
        };
        Self {
            out_dir,
            skipped,
            labels,
            samples,
            duration_ms,
        }
    }
}

/// One intent of the examples document.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntentSummary {
    pub name: String,
    pub examples: usize,
}

/// Result structure for listing intents.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntentListing {
    pub path: String,
    pub intents: Vec<IntentSummary>,
}

/// Something the CLI can print in either output format.
pub trait Render: Serialize {
    fn render_human(&self, args: &BankbotArgs);
}

/// Output a result in the selected format.
pub fn output_result<T: Render>(message: &str, result: &T, args: &BankbotArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.render_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &BankbotArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

fn print_intents(intents: &[IntentPrediction]) {
    println!("Intents:");
    println!("────────");
    if intents.is_empty() {
        println!("  (none)");
    }
    for (rank, prediction) in intents.iter().enumerate() {
        println!(
            "  {}. {:<24} {}",
            rank + 1,
            prediction.label,
            format_score(prediction)
        );
    }
}

fn print_entities(entities: &[ExtractedEntity]) {
    println!("Entities:");
    println!("─────────");
    if entities.is_empty() {
        println!("  (none)");
    }
    for entity in entities {
        println!("  {:<14} {}", entity.entity_type.as_str(), entity.value);
    }
}

/// Hit counts are shown without the epsilon; probabilities as percentages.
fn format_score(prediction: &IntentPrediction) -> String {
    match prediction.kind {
        ScoreKind::KeywordHits => {
            let hits = prediction.score.floor() as u64;
            format!("{hits} keyword hit{}", if hits == 1 { "" } else { "s" })
        }
        ScoreKind::Probability => format!("{:.1}%", prediction.score * 100.0),
    }
}

impl Render for NluAnalysis {
    fn render_human(&self, args: &BankbotArgs) {
        if args.verbosity() > 0 {
            println!("Text: {}", self.text);
            println!("Scorer: {}", self.scorer);
            println!();
        }
        print_intents(&self.intents);
        println!();
        print_entities(&self.entities);
    }
}

impl Render for ExtractionResult {
    fn render_human(&self, _args: &BankbotArgs) {
        print_entities(&self.entities);
    }
}

impl Render for PredictionResult {
    fn render_human(&self, args: &BankbotArgs) {
        if args.verbosity() > 0 {
            println!("Scorer: {}", self.scorer);
        }
        print_intents(&self.intents);
    }
}

impl Render for TrainingResult {
    fn render_human(&self, _args: &BankbotArgs) {
        if self.skipped {
            println!("Model already exists in {}, training skipped", self.out_dir);
        } else {
            println!("Training complete");
            println!("═════════════════");
            println!("Output directory: {}", self.out_dir);
            println!("Intents: {}", self.labels);
            println!("Examples: {}", self.samples);
            println!("Duration: {}ms", self.duration_ms);
        }
    }
}

impl Render for IntentListing {
    fn render_human(&self, args: &BankbotArgs) {
        if args.verbosity() > 0 {
            println!("Intents in {}:", self.path);
        }
        if self.intents.is_empty() {
            println!("  (none)");
        }
        for intent in &self.intents {
            println!("  {:<24} {} examples", intent.name, intent.examples);
        }
    }
}
