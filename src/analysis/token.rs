//! Token types for text analysis.
//!
//! # Examples
//!
//! ```
//! use bankbot_nlu::analysis::token::Token;
//!
//! let token = Token::new("balance");
//! assert_eq!(token.text, "balance");
//! assert_eq!(token.len(), 7);
//! ```

use serde::{Deserialize, Serialize};

/// A single term produced by a tokenizer. The vectorizer counts terms only,
/// so no positions or offsets are kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,
}

/// A stream of tokens flowing through the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

impl Token {
    /// Create a new token with the given text.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token { text: text.into() }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
