//! Analyzers that combine a tokenizer with token filters.
//!
//! ```text
//! Raw Text → RegexTokenizer → LowercaseFilter → Terms
//! ```
//!
//! # Examples
//!
//! ```
//! use bankbot_nlu::analysis::{Analyzer, StandardAnalyzer};
//!
//! let analyzer = StandardAnalyzer::new().unwrap();
//! let terms: Vec<_> = analyzer
//!     .analyze("Check my Balance")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(terms, vec!["check", "my", "balance"]);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, LowercaseFilter};
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so an analyzer owned by a shared scorer
/// can be used from several threads.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Serializable description of a [`StandardAnalyzer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Regular expression whose matches become tokens.
    pub token_pattern: String,
    /// Whether tokens are lower-cased.
    pub lowercase: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            // Terms of two or more word characters.
            token_pattern: r"\b\w\w+\b".to_string(),
            lowercase: true,
        }
    }
}

/// Regex tokenizer followed by an optional lowercase filter.
#[derive(Clone)]
pub struct StandardAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    config: AnalyzerConfig,
}

impl StandardAnalyzer {
    /// Create a new standard analyzer with default settings.
    pub fn new() -> Result<Self> {
        Self::from_config(AnalyzerConfig::default())
    }

    /// Build an analyzer from its serialized configuration.
    pub fn from_config(config: AnalyzerConfig) -> Result<Self> {
        let tokenizer: Arc<dyn Tokenizer> =
            Arc::new(RegexTokenizer::with_pattern(&config.token_pattern)?);

        let mut filters: Vec<Arc<dyn Filter>> = Vec::new();
        if config.lowercase {
            filters.push(Arc::new(LowercaseFilter::new()));
        }

        Ok(StandardAnalyzer {
            tokenizer,
            filters,
            config,
        })
    }

    /// The configuration this analyzer was built from.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

impl std::fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish()
    }
}
