use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::pipeline::{
    DEFAULT_INTERIM_DIR, DEFAULT_LOG_DIR, DEFAULT_LOG_FILENAME, DEFAULT_RAW_DIR,
    TEST_INPUT_FILENAME, TEST_OUTPUT_FILENAME, TRAIN_INPUT_FILENAME, TRAIN_OUTPUT_FILENAME,
};
use crate::constants::preprocess::{
    DEFAULT_PROGRESS_INTERVAL, DEFAULT_TARGET_COLUMN, DEFAULT_TEXT_COLUMN,
};
use crate::errors::PreprocessError;
use crate::types::ColumnName;

/// Which columns decide whether two rows are duplicates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DedupKey {
    /// Rows are duplicates when the raw text and the encoded target are equal.
    #[default]
    TextAndTarget,
    /// Rows are duplicates when every column is equal (after label encoding).
    FullRow,
}

/// How label codes are assigned across the datasets of one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelScope {
    /// Each dataset gets its own encoder fit on its own target values.
    ///
    /// The same raw label can map to different codes in train and test when
    /// their label sets differ.
    #[default]
    PerDataset,
    /// One encoder is fit on the union of every dataset's target values.
    Shared,
}

/// Per-table preprocessing configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Column holding the raw text to normalize.
    pub text_column: ColumnName,
    /// Column holding the categorical label to encode.
    pub target_column: ColumnName,
    /// Duplicate detection policy.
    pub dedup_key: DedupKey,
    /// Emit a debug progress event for every row id divisible by this value.
    pub progress_interval: usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            target_column: DEFAULT_TARGET_COLUMN.to_string(),
            dedup_key: DedupKey::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl PreprocessConfig {
    /// Reject configurations that cannot produce a well-formed table.
    pub fn validated(self) -> Result<Self, PreprocessError> {
        if self.progress_interval == 0 {
            return Err(PreprocessError::Configuration(
                "progress_interval must be > 0".to_string(),
            ));
        }
        if self.text_column == self.target_column {
            return Err(PreprocessError::Configuration(format!(
                "text and target column must differ (both are '{}')",
                self.text_column
            )));
        }
        Ok(self)
    }
}

/// Locations and policies for a full train/test run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding the raw train/test tables.
    pub raw_dir: PathBuf,
    /// Raw train filename inside `raw_dir`.
    pub train_file: String,
    /// Raw test filename inside `raw_dir`.
    pub test_file: String,
    /// Directory receiving processed tables (created when missing).
    pub output_dir: PathBuf,
    /// Processed train filename inside `output_dir`.
    pub train_output_file: String,
    /// Processed test filename inside `output_dir`.
    pub test_output_file: String,
    /// Directory receiving the debug log file.
    pub log_dir: PathBuf,
    /// Debug log filename inside `log_dir`.
    pub log_file: String,
    /// Label encoding scope across train and test.
    pub label_scope: LabelScope,
    /// Per-table preprocessing settings, shared by train and test.
    pub preprocess: PreprocessConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from(DEFAULT_RAW_DIR),
            train_file: TRAIN_INPUT_FILENAME.to_string(),
            test_file: TEST_INPUT_FILENAME.to_string(),
            output_dir: PathBuf::from(DEFAULT_INTERIM_DIR),
            train_output_file: TRAIN_OUTPUT_FILENAME.to_string(),
            test_output_file: TEST_OUTPUT_FILENAME.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_file: DEFAULT_LOG_FILENAME.to_string(),
            label_scope: LabelScope::default(),
            preprocess: PreprocessConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Lay out raw, interim, and log directories under one root.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            raw_dir: root.join("data").join("raw"),
            output_dir: root.join("data").join("interim"),
            log_dir: root.join(DEFAULT_LOG_DIR),
            ..Self::default()
        }
    }

    /// Raw train table path.
    pub fn train_input_path(&self) -> PathBuf {
        self.raw_dir.join(&self.train_file)
    }

    /// Raw test table path.
    pub fn test_input_path(&self) -> PathBuf {
        self.raw_dir.join(&self.test_file)
    }

    /// Processed train table path.
    pub fn train_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.train_output_file)
    }

    /// Processed test table path.
    pub fn test_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.test_output_file)
    }

    /// Debug log file path.
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.log_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.train_input_path(), Path::new("./data/raw/train.csv"));
        assert_eq!(
            config.test_output_path(),
            Path::new("./data/interim/test_processed.csv")
        );
        assert_eq!(config.log_path(), Path::new("logs/data_preprocessing.log"));
        assert_eq!(config.preprocess.text_column, "text");
        assert_eq!(config.preprocess.target_column, "target");
        assert_eq!(config.preprocess.dedup_key, DedupKey::TextAndTarget);
        assert_eq!(config.label_scope, LabelScope::PerDataset);
    }

    #[test]
    fn validated_rejects_zero_interval_and_same_columns() {
        let zero = PreprocessConfig {
            progress_interval: 0,
            ..PreprocessConfig::default()
        };
        assert!(matches!(
            zero.validated(),
            Err(PreprocessError::Configuration(_))
        ));

        let same = PreprocessConfig {
            target_column: "text".to_string(),
            ..PreprocessConfig::default()
        };
        assert!(matches!(
            same.validated(),
            Err(PreprocessError::Configuration(_))
        ));
    }

    #[test]
    fn rooted_at_keeps_filenames() {
        let config = PipelineConfig::rooted_at("/tmp/run");
        assert_eq!(
            config.train_input_path(),
            Path::new("/tmp/run/data/raw/train.csv")
        );
        assert_eq!(config.log_path(), Path::new("/tmp/run/logs/data_preprocessing.log"));
    }
}
