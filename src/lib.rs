#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line runner for the train/test pipeline.
pub mod apps;
/// Preprocessing and pipeline configuration types.
pub mod config;
/// Centralized constants (column defaults, file layout, tokenizer tables).
pub mod constants;
/// Cell values and in-memory tables.
pub mod data;
/// Injected diagnostics sink and its implementations.
pub mod diagnostics;
/// Categorical label encoding.
pub mod labels;
/// `tracing` subscriber setup.
pub mod logging;
/// Label balance metrics.
pub mod metrics;
/// Text normalization (tokenizer, stopwords, stemmer).
pub mod normalize;
/// Train/test pipeline over CSV files.
pub mod pipeline;
/// Per-table preprocessing.
pub mod preprocess;
/// Table transports (CSV on the filesystem).
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Text helpers for diagnostics.
pub mod utils;

mod errors;

pub use config::{DedupKey, LabelScope, PipelineConfig, PreprocessConfig};
pub use data::{Row, Table, Value, ValueKind};
pub use diagnostics::{
    DiagnosticEvent, Diagnostics, MemoryDiagnostics, SharedDiagnostics, TracingDiagnostics,
};
pub use errors::{NormalizeError, PreprocessError};
pub use labels::LabelEncoder;
pub use normalize::{
    EnglishStemmer, NormalizeOutcome, NormalizeStatus, StemmerFactory, StopwordSet,
    TextNormalizer, TokenStemmer,
};
pub use pipeline::{DatasetReport, DatasetSplit, PipelineReport, run_pipeline};
pub use preprocess::{PreprocessSummary, Preprocessor};
pub use transport::{load_table, save_table};
pub use types::{ColumnName, LabelCode, NormalizedText, RowId};
