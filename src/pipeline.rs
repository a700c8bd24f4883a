//! Train/test run: load both raw tables, preprocess, persist.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::Level;

use crate::config::{LabelScope, PipelineConfig};
use crate::constants::pipeline::COMPONENT;
use crate::diagnostics::SharedDiagnostics;
use crate::errors::PreprocessError;
use crate::preprocess::{PreprocessSummary, Preprocessor};
use crate::transport::{load_table, save_table};

/// Dataset role within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DatasetSplit {
    /// Training dataset.
    Train,
    /// Held-out dataset.
    Test,
}

impl DatasetSplit {
    /// Lowercase name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Test => "test",
        }
    }
}

/// Outcome for one dataset of a run.
#[derive(Clone, Debug, Serialize)]
pub struct DatasetReport {
    /// Which dataset this is.
    pub split: DatasetSplit,
    /// CSV the table was loaded from.
    pub input_path: PathBuf,
    /// CSV the processed table was written to.
    pub output_path: PathBuf,
    /// Preprocessing counters.
    pub summary: PreprocessSummary,
}

/// Outcome of a full run.
#[derive(Clone, Debug, Serialize)]
pub struct PipelineReport {
    /// Encoder scope used for the run.
    pub label_scope: LabelScope,
    /// Directory both tables were written to.
    pub output_dir: PathBuf,
    /// Train dataset outcome.
    pub train: DatasetReport,
    /// Test dataset outcome.
    pub test: DatasetReport,
}

/// Load train and test, preprocess both, and write the processed tables.
///
/// Any failure aborts the run: it is logged at error level and returned.
pub fn run_pipeline(
    config: &PipelineConfig,
    diagnostics: SharedDiagnostics,
) -> Result<PipelineReport, PreprocessError> {
    run_stages(config, &diagnostics).map_err(|err| {
        let message = match &err {
            PreprocessError::InputNotFound { .. } => format!("file not found: {err}"),
            PreprocessError::EmptyInput { .. } => format!("empty CSV file: {err}"),
            _ => format!("processing failed: {err}"),
        };
        diagnostics.record(Level::ERROR, COMPONENT, &message);
        err
    })
}

fn run_stages(
    config: &PipelineConfig,
    diagnostics: &SharedDiagnostics,
) -> Result<PipelineReport, PreprocessError> {
    diagnostics.record(Level::INFO, COMPONENT, "loading raw data...");
    let train_input = config.train_input_path();
    let test_input = config.test_input_path();
    let train = load_table(&train_input)?;
    let test = load_table(&test_input)?;
    diagnostics.record(
        Level::INFO,
        COMPONENT,
        &format!("loaded {} train rows and {} test rows", train.len(), test.len()),
    );

    let preprocessor = Preprocessor::new(config.preprocess.clone(), diagnostics.clone())?;
    let ((train_out, train_summary), (test_out, test_summary)) = match config.label_scope {
        LabelScope::PerDataset => (
            preprocessor.preprocess_with_summary(&train)?,
            preprocessor.preprocess_with_summary(&test)?,
        ),
        LabelScope::Shared => {
            let encoder = preprocessor.fit_shared_encoder(&[&train, &test])?;
            (
                preprocessor.preprocess_with_encoder(&train, &encoder)?,
                preprocessor.preprocess_with_encoder(&test, &encoder)?,
            )
        }
    };

    fs::create_dir_all(&config.output_dir)?;
    let train_output = config.train_output_path();
    let test_output = config.test_output_path();
    save_table(&train_out, &train_output)?;
    save_table(&test_out, &test_output)?;
    diagnostics.record(
        Level::INFO,
        COMPONENT,
        &format!("processed data saved to {}", config.output_dir.display()),
    );

    let report = PipelineReport {
        label_scope: config.label_scope,
        output_dir: config.output_dir.clone(),
        train: DatasetReport {
            split: DatasetSplit::Train,
            input_path: train_input,
            output_path: train_output,
            summary: train_summary,
        },
        test: DatasetReport {
            split: DatasetSplit::Test,
            input_path: test_input,
            output_path: test_output,
            summary: test_summary,
        },
    };
    for dataset in [&report.train, &report.test] {
        diagnostics.record(
            Level::DEBUG,
            COMPONENT,
            &format!(
                "{} summary: {}",
                dataset.split.as_str(),
                serde_json::to_string(&dataset.summary)?
            ),
        );
    }
    Ok(report)
}
