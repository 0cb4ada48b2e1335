//! Error types for the Lexifold library.
//!
//! All failures are represented by the [`LexifoldError`] enum. Tokenizer
//! construction problems, allocation failures, segmentation-service failures
//! and match-extraction failures each get their own variant so that the
//! registration shims can map them onto the host engine's status vocabulary
//! via [`LexifoldError::status`].
//!
//! Malformed UTF-8 input is deliberately absent from this list: it decodes to
//! U+FFFD and tokenization carries on.
//!
//! # Examples
//!
//! ```
//! use lexifold::error::{LexifoldError, Result};
//! use lexifold::host::StatusCode;
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexifoldError::invalid_argument("remove_diacritics=2"))
//! }
//!
//! let err = example_operation().unwrap_err();
//! assert_eq!(err.status(), StatusCode::Error);
//! ```

use std::io;

use thiserror::Error;

use crate::host::StatusCode;

/// The main error type for Lexifold operations.
#[derive(Error, Debug)]
pub enum LexifoldError {
    /// Unrecognized or malformed tokenizer configuration argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The `stemmer=` argument named a language with no compiled-in stemmer
    #[error("Unsupported stemmer language: {0}")]
    UnsupportedLanguage(String),

    /// A buffer or table could not be allocated
    #[error("Allocation failed: {0}")]
    Allocation(String),

    /// The normalizer or word-boundary service failed mid-scan
    #[error("Iteration service error: {0}")]
    IterationService(String),

    /// Match extraction could not reconstruct a matched substring
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// An auxiliary function was called with positional arguments
    #[error("Invalid argument count: expected {expected}, got {actual}")]
    InvalidArgumentCount { expected: usize, actual: usize },

    /// A tokenizer or function name is not registered
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O errors (CLI input files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LexifoldError.
pub type Result<T> = std::result::Result<T, LexifoldError>;

impl LexifoldError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LexifoldError::InvalidArgument(msg.into())
    }

    /// Create a new unsupported language error.
    pub fn unsupported_language<S: Into<String>>(language: S) -> Self {
        LexifoldError::UnsupportedLanguage(language.into())
    }

    /// Create a new allocation error.
    pub fn allocation<S: Into<String>>(msg: S) -> Self {
        LexifoldError::Allocation(msg.into())
    }

    /// Create a new iteration service error.
    pub fn iteration_service<S: Into<String>>(msg: S) -> Self {
        LexifoldError::IterationService(msg.into())
    }

    /// Create a new extraction error.
    pub fn extraction<S: Into<String>>(msg: S) -> Self {
        LexifoldError::Extraction(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        LexifoldError::NotFound(msg.into())
    }

    /// Whether this error aborts tokenizer construction.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            LexifoldError::InvalidArgument(_) | LexifoldError::UnsupportedLanguage(_)
        )
    }

    /// Map this error onto the host engine's status vocabulary.
    pub fn status(&self) -> StatusCode {
        match self {
            LexifoldError::Allocation(_) => StatusCode::NoMem,
            LexifoldError::NotFound(_) => StatusCode::NotFound,
            _ => StatusCode::Error,
        }
    }
}

impl From<std::collections::TryReserveError> for LexifoldError {
    fn from(err: std::collections::TryReserveError) -> Self {
        LexifoldError::Allocation(err.to_string())
    }
}
