//! Criterion benchmarks for bankbot-nlu.
//!
//! Covers the per-request path (analysis, entity extraction, keyword and
//! trained intent scoring) and a small training run.

use std::hint::black_box;

use bankbot_nlu::analysis::{Analyzer, StandardAnalyzer};
use bankbot_nlu::config::TrainingConfig;
use bankbot_nlu::entity::EntityExtractor;
use bankbot_nlu::intent::{IntentScorer, KeywordIntentScorer, TrainedIntentScorer};
use bankbot_nlu::training::{IntentExamples, Trainer};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};

/// Generate banking messages for benchmarking.
fn generate_messages(count: usize) -> Vec<String> {
    let templates = [
        "please transfer {n} to my savings account",
        "send rs. {n} from salary to wallet",
        "what is the status of UTR{n}998877",
        "check balance of account number 9{n}12345",
        "pay ₹{n},000 from checking to current",
        "how much money is available in my account",
        "txn: AB{n}-CD is still pending",
    ];

    (0..count)
        .map(|i| templates[i % templates.len()].replace("{n}", &(100 + i).to_string()))
        .collect()
}

fn training_examples() -> IntentExamples {
    let mut examples = IntentExamples::new();
    let intents: [(&str, &[&str]); 3] = [
        (
            "check_balance",
            &[
                "what is my balance",
                "show my available funds",
                "how much money do I have",
                "balance in savings account",
            ],
        ),
        (
            "transfer_money",
            &[
                "transfer 500 to savings",
                "send money to my wallet",
                "pay my electricity bill",
                "move funds from salary to checking",
            ],
        ),
        (
            "transaction_status",
            &[
                "status of my transaction",
                "has my utr gone through",
                "check txn status",
                "is the payment complete",
            ],
        ),
    ];
    for (name, phrases) in intents {
        examples.insert(name, phrases.iter().copied()).unwrap();
    }
    examples
}

/// Benchmark entity extraction.
fn bench_entity_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("entity_extraction");

    let extractor = EntityExtractor::new();
    let messages = generate_messages(1000);

    group.bench_function("extract_single_message", |b| {
        b.iter(|| black_box(extractor.extract(black_box(&messages[1]))))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("extract_batch_messages", |b| {
        b.iter(|| {
            for message in messages.iter().take(100) {
                black_box(extractor.extract(black_box(message)));
            }
        })
    });

    group.finish();
}

/// Benchmark text analysis.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");

    let analyzer = StandardAnalyzer::new().unwrap();
    let messages = generate_messages(100);

    group.throughput(Throughput::Elements(100));
    group.bench_function("analyze_batch_messages", |b| {
        b.iter(|| {
            for message in &messages {
                let tokens: Vec<_> = analyzer.analyze(black_box(message)).unwrap().collect();
                black_box(tokens);
            }
        })
    });

    group.finish();
}

/// Benchmark both intent scorers.
fn bench_intent_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("intent_scoring");

    let messages = generate_messages(100);
    let keyword = KeywordIntentScorer::builtin();
    let bundle = Trainer::default().train(&training_examples()).unwrap();
    let trained = TrainedIntentScorer::new(bundle);

    group.throughput(Throughput::Elements(100));
    group.bench_function("keyword_predict", |b| {
        b.iter(|| {
            for message in &messages {
                black_box(keyword.predict(black_box(message), 3).unwrap());
            }
        })
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("trained_predict", |b| {
        b.iter(|| {
            for message in &messages {
                black_box(trained.predict(black_box(message), 3).unwrap());
            }
        })
    });

    group.finish();
}

/// Benchmark a full training run on a small document.
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(10);

    let examples = training_examples();
    let trainer = Trainer::new(TrainingConfig {
        epochs: 50,
        ..TrainingConfig::default()
    });

    group.bench_function("train_in_memory", |b| {
        b.iter(|| black_box(trainer.train(black_box(&examples)).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_entity_extraction,
    bench_text_analysis,
    bench_intent_scoring
);

// Separate group for slower benchmarks
criterion_group!(slow_benches, bench_training);

criterion_main!(benches, slow_benches);
