//! TF-IDF vectorizer for text feature extraction.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::{Analyzer, AnalyzerConfig, StandardAnalyzer};
use crate::error::{NluError, Result};

/// TF-IDF vectorizer for text feature extraction.
///
/// The vocabulary is sorted so that feature indices are stable across runs.
/// Feature vectors are raw term counts weighted by smooth IDF and scaled to
/// unit L2 norm.
#[derive(Clone, Serialize, Deserialize)]
#[serde(into = "VectorizerState", try_from = "VectorizerState")]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> feature index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each feature index.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
    /// Configuration the analyzer was built from.
    analyzer_config: AnalyzerConfig,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

/// Serialized form of a fitted vectorizer.
#[derive(Serialize, Deserialize)]
struct VectorizerState {
    analyzer: AnalyzerConfig,
    /// Terms ordered by feature index.
    terms: Vec<String>,
    idf: Vec<f64>,
    n_documents: usize,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .field("analyzer_config", &self.analyzer_config)
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer using the given tokenization settings.
    pub fn new(analyzer_config: AnalyzerConfig) -> Result<Self> {
        let analyzer = Arc::new(StandardAnalyzer::from_config(analyzer_config.clone())?);
        Ok(Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer_config,
            analyzer,
        })
    }

    /// Fit the vectorizer on training documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(NluError::model("cannot fit a vectorizer on zero documents"));
        }

        let mut terms = BTreeSet::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique_tokens: HashSet<String> = self.tokenize(doc)?.into_iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
                terms.insert(token);
            }
        }

        if terms.is_empty() {
            return Err(NluError::model(
                "training documents contain no terms after analysis",
            ));
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (idx, term) in terms.into_iter().enumerate() {
            let df = document_frequency.get(&term).copied().unwrap_or(0) as f64;
            // IDF = ln((N + 1) / (df + 1)) + 1
            idf.push(((n + 1.0) / (df + 1.0)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.n_documents = documents.len();

        Ok(())
    }

    /// Fit on `documents` and return their feature vectors.
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<Vec<f64>>> {
        self.fit(documents)?;
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Transform a document into a TF-IDF feature vector.
    ///
    /// Terms outside the vocabulary are ignored; a document with no known
    /// terms maps to the zero vector.
    pub fn transform(&self, document: &str) -> Result<Vec<f64>> {
        let mut features = vec![0.0; self.vocabulary.len()];

        for token in self.tokenize(document)? {
            if let Some(&idx) = self.vocabulary.get(&token) {
                features[idx] += 1.0;
            }
        }

        for (idx, value) in features.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        Ok(features)
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Feature index of `term`, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn analyzer_config(&self) -> &AnalyzerConfig {
        &self.analyzer_config
    }
}

impl From<TfIdfVectorizer> for VectorizerState {
    fn from(vectorizer: TfIdfVectorizer) -> Self {
        let mut terms = vec![String::new(); vectorizer.vocabulary.len()];
        for (term, idx) in vectorizer.vocabulary {
            terms[idx] = term;
        }
        VectorizerState {
            analyzer: vectorizer.analyzer_config,
            terms,
            idf: vectorizer.idf,
            n_documents: vectorizer.n_documents,
        }
    }
}

impl TryFrom<VectorizerState> for TfIdfVectorizer {
    type Error = NluError;

    fn try_from(state: VectorizerState) -> Result<Self> {
        if state.terms.len() != state.idf.len() {
            return Err(NluError::model(format!(
                "vectorizer has {} terms but {} idf weights",
                state.terms.len(),
                state.idf.len()
            )));
        }

        let mut vectorizer = TfIdfVectorizer::new(state.analyzer)?;
        vectorizer.vocabulary = state
            .terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();
        if vectorizer.vocabulary.len() != state.idf.len() {
            return Err(NluError::model("vectorizer vocabulary contains duplicate terms"));
        }
        vectorizer.idf = state.idf;
        vectorizer.n_documents = state.n_documents;
        Ok(vectorizer)
    }
}
