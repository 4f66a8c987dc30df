//! Error types for the cutover library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cutover operations.
#[derive(Debug, Error)]
pub enum CutoverError {
    /// No countries were selected for the run.
    #[error("Country allow-set is empty: select at least one country before processing")]
    EmptyAllowSet,

    /// A named input lacks columns the family needs.
    #[error(
        "Input '{table}' is missing required columns {missing:?} (columns found: {present:?})"
    )]
    MissingColumns {
        table: String,
        missing: Vec<String>,
        present: Vec<String>,
    },

    /// A named input already carries the column the lookup key is written to.
    #[error(
        "Input '{table}' already has a column named '{column}', which is reserved for the lookup key: rename or remove it"
    )]
    ReservedColumn { table: String, column: String },

    /// A table was built or combined inconsistently.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File without a header row.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CutoverError {
    /// Whether this error means the inputs must be fixed before the run can proceed.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CutoverError::EmptyAllowSet
                | CutoverError::MissingColumns { .. }
                | CutoverError::ReservedColumn { .. }
        )
    }
}

/// Result type alias for cutover operations.
pub type Result<T> = std::result::Result<T, CutoverError>;
