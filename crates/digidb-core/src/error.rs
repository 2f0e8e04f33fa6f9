//! Error types for digidb-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in digidb-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid generator configuration
    #[error("invalid config '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// Unsupported export format
    #[error("unknown export format '{0}' (expected csv or json)")]
    UnknownFormat(String),

    /// CSV writer error from the csv crate
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single table row was skipped.
///
/// These never abort a document scan; they are reported as diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("expected at least {expected} cells, found {found}")]
    TooFewCells { expected: usize, found: usize },

    #[error("column '{column}' is not a non-negative integer: '{value}'")]
    InvalidInteger { column: &'static str, value: String },

    #[error("column '{column}' is not a non-negative number: '{value}'")]
    InvalidFloat { column: &'static str, value: String },
}
