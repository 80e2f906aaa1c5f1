//! Error types for the ExoML library.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::InputField;
use crate::schema::FieldId;

/// Main error type for ExoML operations.
#[derive(Debug, Error)]
pub enum ExomlError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// No line of the input produced two or more columns.
    #[error("Could not detect column headers after scanning {lines_scanned} lines")]
    SchemaDetectionFailed { lines_scanned: usize },

    /// One or more required fields have no column assigned.
    #[error("Incomplete column mapping; unmapped fields: {}", join_fields(.missing))]
    IncompleteMapping { missing: Vec<FieldId> },

    /// A manual override names a column that is not among the detected headers.
    #[error("Column '{column}' for field '{field}' is not a detected header")]
    UnknownColumn { field: FieldId, column: String },

    /// A manual override names a field id outside the registry.
    #[error("Unknown field id: {0}")]
    UnknownField(String),

    /// Classification inputs failed validation; no result was produced.
    #[error("Invalid classification input: {}", join_violations(.violations))]
    InvalidClassificationInput { violations: Vec<InputViolation> },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why a single classification input was rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// The value was blank.
    Missing,
    /// The value could not be read as a finite number.
    NotNumeric { raw: String },
    /// The value lies outside the declared inclusive range.
    OutOfRange { value: f64, min: f64, max: f64 },
}

/// A rejected classification input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputViolation {
    pub field: InputField,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl fmt::Display for InputViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "{} is missing", self.field.label()),
            ViolationKind::NotNumeric { raw } => {
                write!(f, "{} is not a number ('{}')", self.field.label(), raw)
            }
            ViolationKind::OutOfRange { value, min, max } => write!(
                f,
                "{} = {} is outside the allowed range {} to {}",
                self.field.label(),
                value,
                min,
                max
            ),
        }
    }
}

fn join_fields(fields: &[FieldId]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_violations(violations: &[InputViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for ExoML operations.
pub type Result<T> = std::result::Result<T, ExomlError>;
