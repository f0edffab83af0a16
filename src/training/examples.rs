//! The intent-examples document used for training.
//!
//! Three document shapes are accepted:
//!
//! ```json
//! {"intents": {"check_balance": {"examples": ["what is my balance"]}}}
//! {"intents": [{"name": "check_balance", "examples": ["what is my balance"]}]}
//! [{"name": "check_balance", "examples": ["what is my balance"]}]
//! ```
//!
//! All of them normalize to the same ordered mapping; [`IntentExamples::save`]
//! always writes the first shape.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{NluError, Result};

/// One `(query, intent)` training pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSample {
    pub query: String,
    pub intent: String,
}

impl IntentSample {
    pub fn new<Q: Into<String>, I: Into<String>>(query: Q, intent: I) -> Self {
        Self {
            query: query.into(),
            intent: intent.into(),
        }
    }
}

#[derive(Deserialize)]
struct ExampleList {
    examples: Vec<String>,
}

#[derive(Deserialize)]
struct NamedExamples {
    name: String,
    examples: Vec<String>,
}

/// Ordered mapping from intent name to example phrases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentExamples {
    intents: Vec<(String, Vec<String>)>,
}

impl IntentExamples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a document from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let examples = Self::from_json_str(&content)?;
        info!(
            "loaded {} intents ({} examples) from {}",
            examples.len(),
            examples.example_count(),
            path.display()
        );
        Ok(examples)
    }

    /// Read a document, treating a missing file as an empty mapping.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no intents document at {}", path.display());
            return Ok(Self::new());
        }
        Self::load(path)
    }

    /// Parse any of the accepted shapes.
    ///
    /// An intent name listed twice keeps its first position and accumulates
    /// the examples of every entry.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        let mut examples = Self::new();

        match value {
            Value::Object(mut root) => match root.remove("intents") {
                Some(Value::Object(map)) => {
                    for (name, entry) in map {
                        let list: ExampleList = serde_json::from_value(entry).map_err(|e| {
                            NluError::invalid_document(format!(
                                "intent {name:?} must be an object with an \"examples\" list: {e}"
                            ))
                        })?;
                        examples.push(name, list.examples);
                    }
                }
                Some(Value::Array(entries)) => examples.push_named(entries)?,
                Some(other) => {
                    return Err(NluError::invalid_document(format!(
                        "\"intents\" must be an object or a list, found {}",
                        kind_of(&other)
                    )));
                }
                None => {
                    return Err(NluError::invalid_document(
                        "top-level object has no \"intents\" field",
                    ));
                }
            },
            Value::Array(entries) => examples.push_named(entries)?,
            other => {
                return Err(NluError::invalid_document(format!(
                    "expected an object or a list, found {}",
                    kind_of(&other)
                )));
            }
        }

        Ok(examples)
    }

    fn push_named(&mut self, entries: Vec<Value>) -> Result<()> {
        for (position, entry) in entries.into_iter().enumerate() {
            let named: NamedExamples = serde_json::from_value(entry).map_err(|e| {
                NluError::invalid_document(format!(
                    "intent entry {position} needs \"name\" and \"examples\": {e}"
                ))
            })?;
            self.push(named.name, named.examples);
        }
        Ok(())
    }

    fn push(&mut self, name: String, new_examples: Vec<String>) {
        match self.intents.iter_mut().find(|(n, _)| *n == name) {
            Some((_, examples)) => examples.extend(new_examples),
            None => self.intents.push((name, new_examples)),
        }
    }

    /// Write the document in the `{"intents": {name: {"examples": [...]}}}`
    /// shape, pretty-printed with non-ASCII text kept as-is.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let intents: Map<String, Value> = self
            .intents
            .iter()
            .map(|(name, examples)| (name.clone(), json!({ "examples": examples })))
            .collect();
        let mut content = serde_json::to_string_pretty(&json!({ "intents": intents }))?;
        content.push('\n');
        fs::write(path, content)?;

        info!("saved {} intents to {}", self.len(), path.display());
        Ok(())
    }

    /// Set the examples of `name`, replacing any existing ones.
    ///
    /// Examples are trimmed and blank ones dropped. A new intent is appended
    /// at the end; an existing one keeps its position.
    pub fn insert<S, I, E>(&mut self, name: S, examples: I) -> Result<()>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = E>,
        E: AsRef<str>,
    {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(NluError::invalid_argument("intent name cannot be blank"));
        }

        let examples: Vec<String> = examples
            .into_iter()
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if examples.is_empty() {
            return Err(NluError::invalid_argument(format!(
                "intent {name:?} needs at least one non-blank example"
            )));
        }

        match self.intents.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = examples,
            None => self.intents.push((name.to_string(), examples)),
        }
        Ok(())
    }

    /// Examples of one intent.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.intents
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, examples)| examples.as_slice())
    }

    /// Intent names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.intents.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.intents
            .iter()
            .map(|(name, examples)| (name.as_str(), examples.as_slice()))
    }

    /// Flatten into training pairs, in document order.
    pub fn samples(&self) -> Vec<IntentSample> {
        self.intents
            .iter()
            .flat_map(|(intent, examples)| {
                examples
                    .iter()
                    .map(move |query| IntentSample::new(query.clone(), intent.clone()))
            })
            .collect()
    }

    /// Total number of examples across all intents.
    pub fn example_count(&self) -> usize {
        self.intents.iter().map(|(_, examples)| examples.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
