//! Error types for the temu library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`TemuError`] enum. Input errors (bad regex, bad cluster count, ...) are
//! reported to callers as `{"error": "..."}` objects by the engine; they are
//! never escalated into panics.
//!
//! # Examples
//!
//! ```
//! use temu::error::{Result, TemuError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TemuError::invalid_cluster_count("number of clusters must be a positive integer"))
//! }
//!
//! let err = example_operation().unwrap_err();
//! assert!(err.is_input_error());
//! assert_eq!(err.status_code(), 400);
//! ```

use std::io;

use thiserror::Error;

/// The main error type for temu operations.
#[derive(Error, Debug)]
pub enum TemuError {
    /// I/O errors (reading document files, stdin, ...)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The regex matcher could not compile the supplied pattern.
    #[error("Invalid regular expression: {0}")]
    InvalidRegex(String),

    /// The cluster count is not a positive integer.
    #[error("Clustering error: {0}")]
    InvalidClusterCount(String),

    /// More clusters were requested than there are documents.
    #[error(
        "The number of documents ({documents}) must be greater than or equal to the number of clusters ({clusters})"
    )]
    NotEnoughDocuments { documents: usize, clusters: usize },

    /// Normalization removed every token from the corpus.
    #[error("Clustering error: empty vocabulary; perhaps the documents only contain stop words")]
    EmptyVocabulary,

    /// The boolean query could not be processed.
    #[error("Failed to process boolean query: {0}")]
    BooleanQuery(String),

    /// The method identifier is not one the engine knows.
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// The request carried no usable document.
    #[error("Please provide at least one document.")]
    NoDocuments,

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected failure caught at the engine boundary
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with TemuError.
pub type Result<T> = std::result::Result<T, TemuError>;

impl TemuError {
    /// Create a new invalid regex error.
    pub fn invalid_regex<S: Into<String>>(msg: S) -> Self {
        TemuError::InvalidRegex(msg.into())
    }

    /// Create a new invalid cluster count error.
    pub fn invalid_cluster_count<S: Into<String>>(msg: S) -> Self {
        TemuError::InvalidClusterCount(msg.into())
    }

    /// Create a new boolean query error.
    pub fn boolean_query<S: Into<String>>(msg: S) -> Self {
        TemuError::BooleanQuery(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TemuError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TemuError::Other(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        TemuError::Internal(msg.into())
    }

    /// Whether this error describes a violated precondition of the request
    /// rather than a failure inside the engine.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TemuError::InvalidRegex(_)
                | TemuError::InvalidClusterCount(_)
                | TemuError::NotEnoughDocuments { .. }
                | TemuError::EmptyVocabulary
                | TemuError::BooleanQuery(_)
                | TemuError::UnknownMethod(_)
                | TemuError::NoDocuments
        )
    }

    /// HTTP-style status code for an outer transport layer.
    pub fn status_code(&self) -> u16 {
        if self.is_input_error() { 400 } else { 500 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = TemuError::invalid_regex("unclosed group");
        assert_eq!(
            error.to_string(),
            "Invalid regular expression: unclosed group"
        );

        let error = TemuError::boolean_query("nesting too deep");
        assert_eq!(
            error.to_string(),
            "Failed to process boolean query: nesting too deep"
        );

        let error = TemuError::NotEnoughDocuments {
            documents: 2,
            clusters: 3,
        };
        assert!(error.to_string().contains("(2)"));
        assert!(error.to_string().contains("(3)"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(TemuError::NoDocuments.status_code(), 400);
        assert_eq!(TemuError::UnknownMethod("x".into()).status_code(), 400);
        assert_eq!(TemuError::internal("boom").status_code(), 500);
        assert_eq!(TemuError::internal("boom").to_string(), "Internal error: boom");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let temu_error = TemuError::from(io_error);

        match temu_error {
            TemuError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
