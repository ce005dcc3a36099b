//! Error types for sortviz.
//!
//! Every fallible operation returns `Result<T, SortError>` instead of
//! panicking. Index faults additionally trip a `debug_assert!` at the
//! point of detection, so they are fatal in debug builds.

use thiserror::Error;

/// Result type alias for sortviz operations.
pub type SortResult<T> = Result<T, SortError>;

/// Unified error type for all sortviz operations.
#[derive(Debug, Error)]
pub enum SortError {
    // ===== Core Errors =====
    /// Empty or malformed input (sequence, viewport).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An index fell outside the sequence bounds.
    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Sequence length at the time of access.
        len: usize,
    },

    /// The requested algorithm has no step generator.
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SortError {
    /// Create an invalid-input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an index error, asserting in debug builds.
    ///
    /// Correct loop bounds never produce this, so reaching it is a defect.
    #[must_use]
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        debug_assert!(index < len, "index {index} out of range for length {len}");
        Self::IndexOutOfRange { index, len }
    }

    /// Check if this error indicates a programming defect rather than bad input.
    #[must_use]
    pub const fn is_defect(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }
}
