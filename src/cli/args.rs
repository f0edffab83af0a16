//! Command line argument parsing for the bankbot CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::NluConfig;

/// bankbot - intent and entity recognition for banking requests
#[derive(Parser, Debug, Clone)]
#[command(name = "bankbot")]
#[command(about = "Intent and entity recognition for banking requests")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BankbotArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON); command-line flags override its values
    #[arg(short, long, value_name = "FILE", env = "BANKBOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BankbotArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// The configuration file if one was given, otherwise the defaults.
    pub fn load_config(&self) -> crate::error::Result<NluConfig> {
        match &self.config {
            Some(path) => NluConfig::load(path),
            None => Ok(NluConfig::default()),
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rank intents and extract entities from a message
    Analyze(AnalyzeArgs),

    /// Extract entities from a message
    Extract(ExtractArgs),

    /// Rank intents for a message
    Predict(PredictArgs),

    /// Train the intent model from an examples document
    Train(TrainArgs),

    /// Inspect or edit the intent examples document
    Intents(IntentsArgs),
}

/// Where to find the intent model and how many intents to return.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Model directory (trained bundle and/or intents.json keywords)
    #[arg(short, long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,

    /// Maximum number of intents to return
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

impl ModelArgs {
    /// Apply the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut NluConfig) {
        if let Some(model_dir) = &self.model_dir {
            config.model_dir = model_dir.clone();
        }
        if let Some(top_k) = self.top_k {
            config.top_k = top_k;
        }
    }
}

/// Arguments for analyzing a message
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// The user message
    #[arg(value_name = "TEXT")]
    pub text: String,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Arguments for entity extraction
#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    /// The user message
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for intent prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// The user message
    #[arg(value_name = "TEXT")]
    pub text: String,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Intent examples document
    #[arg(short, long, value_name = "FILE")]
    pub intents: Option<PathBuf>,

    /// Output directory for the model bundle
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Number of passes over the training data
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Mini-batch size
    #[arg(short, long)]
    pub batch: Option<usize>,

    /// Learning rate
    #[arg(long)]
    pub lr: Option<f64>,
}

impl TrainArgs {
    /// Apply the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut NluConfig) {
        if let Some(intents) = &self.intents {
            config.intents_path = intents.clone();
        }
        if let Some(out_dir) = &self.out_dir {
            config.model_dir = out_dir.clone();
        }
        if let Some(epochs) = self.epochs {
            config.training.epochs = epochs;
        }
        if let Some(batch) = self.batch {
            config.training.batch_size = batch;
        }
        if let Some(lr) = self.lr {
            config.training.learning_rate = lr;
        }
    }
}

/// Arguments for the intents subcommands
#[derive(Parser, Debug, Clone)]
pub struct IntentsArgs {
    /// Intent examples document
    #[arg(short, long, value_name = "FILE", global = true)]
    pub intents: Option<PathBuf>,

    #[command(subcommand)]
    pub command: IntentsCommand,
}

/// Operations on the examples document
#[derive(Subcommand, Debug, Clone)]
pub enum IntentsCommand {
    /// List intents with their example counts
    List,

    /// Add an intent, replacing the examples of an existing one
    Add(IntentsAddArgs),
}

/// Arguments for adding an intent
#[derive(Parser, Debug, Clone)]
pub struct IntentsAddArgs {
    /// Intent name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Example phrases
    #[arg(value_name = "EXAMPLE", required = true)]
    pub examples: Vec<String>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
