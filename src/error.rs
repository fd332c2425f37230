//! Error types.
//!
//! Only collaborator failures surface as errors: unreadable files,
//! undecodable tables, bad configuration, and reference data that fails
//! validation. Defects inside a candidate schedule are never errors; they
//! are measured.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Result type for fallible operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors raised before or around an evaluation.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A reference table could not be decoded.
    #[error("malformed {table} table: {source}")]
    Csv {
        /// Table name (students, teachers, slots, busy).
        table: &'static str,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },

    /// The candidate schedule is not valid JSON.
    #[error("malformed candidate schedule: {0}")]
    Json(#[from] serde_json::Error),

    /// The candidate schedule is JSON but not an array.
    #[error("candidate schedule must be a JSON array, found {0}")]
    NotAnArray(&'static str),

    /// Generator output contains no JSON array.
    #[error("generator output contains no schedule array")]
    NoScheduleFound,

    /// The configuration file could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Reference tables failed validation.
    #[error("invalid reference data ({} problem(s)): {}", .0.len(), summarize(.0))]
    InvalidReference(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
