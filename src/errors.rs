use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{ColumnName, RowId};

/// Error type for table access, label encoding, configuration, and persistence failures.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// A required column is absent from the table.
    #[error("column not found: '{column}'")]
    ColumnNotFound {
        /// Name that was looked up.
        column: ColumnName,
    },
    /// Two columns share a name.
    #[error("duplicate column name '{column}'")]
    DuplicateColumn {
        /// Repeated name.
        column: ColumnName,
    },
    /// A row does not match the table width.
    #[error("row {row} has {found} values but the table has {expected} columns")]
    RowWidth {
        /// Offending row id.
        row: RowId,
        /// Column count of the table.
        expected: usize,
        /// Value count of the row.
        found: usize,
    },
    /// A target cell is `Null`.
    #[error("target value is missing at row {row}")]
    MissingLabel {
        /// Row holding the missing label.
        row: RowId,
    },
    /// The target column mixes text and numeric labels.
    #[error("target column mixes {first} and {second} labels; they cannot be ordered")]
    MixedLabelKinds {
        /// Kind of the first label seen.
        first: &'static str,
        /// Conflicting kind.
        second: &'static str,
    },
    /// A label was not seen when the encoder was fit.
    #[error("label '{label}' was not seen when the encoder was fit")]
    UnknownLabel {
        /// Rendered label.
        label: String,
    },
    /// An input table does not exist.
    #[error("input file not found: {}", path.display())]
    InputNotFound {
        /// Missing path.
        path: PathBuf,
    },
    /// An input table has no header row.
    #[error("input file has no columns to parse: {}", path.display())]
    EmptyInput {
        /// Empty file path.
        path: PathBuf,
    },
    /// Malformed CSV.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Summary rendering failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Row-level failure raised while normalizing one text value.
///
/// These never leave the normalizer; they are logged and degrade to an empty string.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The stemmer rejected a token.
    #[error("failed to stem token '{token}': {reason}")]
    Stem {
        /// Token being stemmed.
        token: String,
        /// Stemmer-provided reason.
        reason: String,
    },
    /// A step panicked; holds the panic message.
    #[error("normalization panicked: {0}")]
    Panicked(String),
}
