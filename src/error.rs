//! Error types for the bankbot NLU library.
//!
//! All fallible operations return [`NluError`] through the [`Result`] alias.
//! Text-level operations (entity extraction and keyword scoring) never fail;
//! errors come from loading or writing models and configuration documents.
//!
//! # Examples
//!
//! ```
//! use bankbot_nlu::error::{NluError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(NluError::invalid_argument("top_k must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for NLU operations.
#[derive(Error, Debug)]
pub enum NluError {
    /// I/O errors (reading documents, writing artifacts)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary artifact encoding/decoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Trained model errors (missing or inconsistent artifacts, training failures)
    #[error("Model error: {0}")]
    Model(String),

    /// Intent-examples document does not match any accepted shape
    #[error("Invalid intents document: {0}")]
    InvalidDocument(String),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid argument passed by a caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Pattern compilation errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for operations that may fail with NluError.
pub type Result<T> = std::result::Result<T, NluError>;

impl From<bincode::Error> for NluError {
    fn from(err: bincode::Error) -> Self {
        NluError::Serialization(err.to_string())
    }
}

impl NluError {
    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        NluError::Model(msg.into())
    }

    /// Create a new invalid document error.
    pub fn invalid_document<S: Into<String>>(msg: S) -> Self {
        NluError::InvalidDocument(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        NluError::InvalidConfig(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        NluError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = NluError::model("vectorizer.bin is missing");
        assert_eq!(error.to_string(), "Model error: vectorizer.bin is missing");

        let error = NluError::invalid_document("expected an object or a list");
        assert_eq!(
            error.to_string(),
            "Invalid intents document: expected an object or a list"
        );

        let error = NluError::invalid_config("epochs must be at least 1");
        assert_eq!(
            error.to_string(),
            "Invalid configuration: epochs must be at least 1"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let nlu_error = NluError::from(io_error);

        match nlu_error {
            NluError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(NluError::from(json_error), NluError::Json(_)));
    }

    #[test]
    fn test_bincode_error_conversion() {
        let bincode_error = bincode::deserialize::<String>(&[0xff]).unwrap_err();
        assert!(matches!(
            NluError::from(bincode_error),
            NluError::Serialization(_)
        ));
    }
}
