//! Text analysis used by the TF-IDF vectorizer.
//!
//! Tokenization here is regular-expression matching only: a [`RegexTokenizer`]
//! splits text into terms, filters normalize them, and an [`Analyzer`] ties the
//! two together. The analyzer configuration is stored alongside a trained
//! vectorizer so that inference tokenizes exactly as training did.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, AnalyzerConfig, StandardAnalyzer};
pub use token::{Token, TokenStream};
pub use token_filter::{Filter, LowercaseFilter};
pub use tokenizer::{RegexTokenizer, Tokenizer};
