//! Command implementations for the bankbot CLI.

use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::NluConfig;
use crate::engine::NluEngine;
use crate::entity::EntityExtractor;
use crate::intent::ModelLoader;
use crate::training::{IntentExamples, Trainer};

/// Execute a CLI command.
pub fn execute_command(args: BankbotArgs) -> Result<()> {
    let config = args.load_config().with_context(|| {
        format!(
            "failed to load configuration from {}",
            args.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;

    match &args.command {
        Command::Analyze(analyze_args) => analyze(analyze_args, config, &args),
        Command::Extract(extract_args) => extract(extract_args, &args),
        Command::Predict(predict_args) => predict(predict_args, config, &args),
        Command::Train(train_args) => train(train_args, config, &args),
        Command::Intents(intents_args) => match &intents_args.command {
            IntentsCommand::List => list_intents(intents_args, config, &args),
            IntentsCommand::Add(add_args) => add_intent(intents_args, add_args, config, &args),
        },
    }
}

/// Rank intents and extract entities.
fn analyze(args: &AnalyzeArgs, mut config: NluConfig, cli_args: &BankbotArgs) -> Result<()> {
    args.model.apply(&mut config);
    config.validate().context("invalid model parameters")?;

    let engine = NluEngine::from_config(&config).with_context(|| {
        format!("failed to load intent model from {}", config.model_dir.display())
    })?;
    let analysis = engine.analyze(&args.text, config.top_k)?;

    output_result("Analysis", &analysis, cli_args)?;
    Ok(())
}

/// Extract entities only.
fn extract(args: &ExtractArgs, cli_args: &BankbotArgs) -> Result<()> {
    let entities = EntityExtractor::new().extract(&args.text);

    output_result(
        "Extracted entities",
        &ExtractionResult {
            text: args.text.clone(),
            entities,
        },
        cli_args,
    )?;
    Ok(())
}

/// Rank intents only.
fn predict(args: &PredictArgs, mut config: NluConfig, cli_args: &BankbotArgs) -> Result<()> {
    args.model.apply(&mut config);
    config.validate().context("invalid model parameters")?;

    let scorer = ModelLoader::new(&config.model_dir).load().with_context(|| {
        format!("failed to load intent model from {}", config.model_dir.display())
    })?;
    let intents = scorer.predict(&args.text, config.top_k)?;

    output_result(
        "Intent prediction",
        &PredictionResult {
            text: args.text.clone(),
            scorer: scorer.name().to_string(),
            intents,
        },
        cli_args,
    )?;
    Ok(())
}

/// Train the intent model.
fn train(args: &TrainArgs, mut config: NluConfig, cli_args: &BankbotArgs) -> Result<()> {
    args.apply(&mut config);
    config.validate().context("invalid training parameters")?;

    let examples = IntentExamples::load(&config.intents_path).with_context(|| {
        format!(
            "failed to read intent examples from {}",
            config.intents_path.display()
        )
    })?;

    info!(
        "training from {} into {}",
        config.intents_path.display(),
        config.model_dir.display()
    );
    let start_time = Instant::now();
    let outcome = Trainer::new(config.training.clone())
        .train_to_dir(&examples, &config.model_dir)
        .with_context(|| format!("training into {} failed", config.model_dir.display()))?;
    let duration = start_time.elapsed();

    output_result(
        "Training",
        &TrainingResult::new(
            config.model_dir.display().to_string(),
            outcome,
            duration.as_millis() as u64,
        ),
        cli_args,
    )?;
    Ok(())
}

/// List the intents of the examples document.
fn list_intents(args: &IntentsArgs, mut config: NluConfig, cli_args: &BankbotArgs) -> Result<()> {
    if let Some(path) = &args.intents {
        config.intents_path = path.clone();
    }

    let examples = IntentExamples::load_or_empty(&config.intents_path).with_context(|| {
        format!(
            "failed to read intent examples from {}",
            config.intents_path.display()
        )
    })?;

    output_result("Intents", &listing(&config, &examples), cli_args)?;
    Ok(())
}

/// Add or replace an intent in the examples document.
fn add_intent(
    args: &IntentsArgs,
    add_args: &IntentsAddArgs,
    mut config: NluConfig,
    cli_args: &BankbotArgs,
) -> Result<()> {
    if let Some(path) = &args.intents {
        config.intents_path = path.clone();
    }

    let mut examples = IntentExamples::load_or_empty(&config.intents_path).with_context(|| {
        format!(
            "failed to read intent examples from {}",
            config.intents_path.display()
        )
    })?;
    examples.insert(&add_args.name, &add_args.examples)?;
    examples.save(&config.intents_path).with_context(|| {
        format!(
            "failed to write intent examples to {}",
            config.intents_path.display()
        )
    })?;

    output_result("Intent saved", &listing(&config, &examples), cli_args)?;
    Ok(())
}

fn listing(config: &NluConfig, examples: &IntentExamples) -> IntentListing {
    IntentListing {
        path: config.intents_path.display().to_string(),
        intents: examples
            .iter()
            .map(|(name, list)| IntentSummary {
                name: name.to_string(),
                examples: list.len(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;

    use super::*;

    #[test]
    fn test_intents_add_then_train() {
        let dir = tempfile::tempdir().unwrap();
        let intents = dir.path().join("intents.json");
        let model_dir = dir.path().join("model");
        let intents_arg = intents.to_str().unwrap();

        for (name, examples) in [
            ("check_balance", ["what is my balance", "show available funds"]),
            ("transfer_money", ["transfer money to savings", "send 500 to wallet"]),
        ] {
            let mut argv = vec!["bankbot", "-q", "intents", "--intents", intents_arg, "add", name];
            argv.extend(examples);
            execute_command(BankbotArgs::try_parse_from(argv).unwrap()).unwrap();
        }

        let saved = IntentExamples::load(&intents).unwrap();
        assert_eq!(saved.len(), 2);

        let args = BankbotArgs::try_parse_from([
            "bankbot",
            "-q",
            "train",
            "--intents",
            intents_arg,
            "--out-dir",
            model_dir.to_str().unwrap(),
        ])
        .unwrap();
        execute_command(args).unwrap();
        assert!(ModelLoader::new(&model_dir).has_trained_model());
    }

    #[test]
    fn test_train_with_missing_document_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = BankbotArgs::try_parse_from([
            "bankbot",
            "-q",
            "train",
            "--intents",
            dir.path().join("missing.json").to_str().unwrap(),
            "--out-dir",
            dir.path().join("model").to_str().unwrap(),
        ])
        .unwrap();

        let err = execute_command(args).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read intent examples"));
    }

    #[test]
    fn test_config_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("bankbot.json");
        fs::write(&config_path, r#"{"top_k": 0}"#).unwrap();

        let args = BankbotArgs::try_parse_from([
            "bankbot",
            "-q",
            "--config",
            config_path.to_str().unwrap(),
            "extract",
            "hello",
        ])
        .unwrap();
        assert!(execute_command(args).is_err());
    }

    #[test]
    fn test_zero_top_k_flag_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let model_dir = dir.path().to_str().unwrap();

        for command in ["predict", "analyze"] {
            let args = BankbotArgs::try_parse_from([
                "bankbot",
                "-q",
                command,
                "check balance",
                "--model-dir",
                model_dir,
                "--top-k",
                "0",
            ])
            .unwrap();

            let err = execute_command(args).unwrap_err();
            assert!(
                format!("{err:#}").contains("top_k must be at least 1"),
                "{command}: {err:#}"
            );
        }
    }
}
