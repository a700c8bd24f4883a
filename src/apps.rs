use std::error::Error;
use std::ffi::OsString;

use clap::{Parser, error::ErrorKind};

use crate::config::PipelineConfig;
use crate::constants::preprocess::{DEFAULT_TARGET_COLUMN, DEFAULT_TEXT_COLUMN};
use crate::diagnostics::TracingDiagnostics;
use crate::logging::init_logging;
use crate::pipeline::{DatasetReport, PipelineReport, run_pipeline};

#[derive(Debug, Parser)]
#[command(
    name = "textprep",
    disable_help_subcommand = true,
    about = "Encode labels, drop duplicates, and normalize text for train/test CSVs",
    long_about = "Read data/raw/train.csv and data/raw/test.csv, encode the target column, drop duplicate rows, normalize and stem the text column, and write data/interim/train_processed.csv and data/interim/test_processed.csv.",
    after_help = "Console output shows INFO and above; logs/data_preprocessing.log also records DEBUG progress."
)]
struct PreprocessCli {
    #[arg(
        long = "text-column",
        value_name = "NAME",
        default_value = DEFAULT_TEXT_COLUMN,
        help = "Column holding the raw text"
    )]
    text_column: String,
    #[arg(
        long = "target-column",
        value_name = "NAME",
        default_value = DEFAULT_TARGET_COLUMN,
        help = "Column holding the categorical label"
    )]
    target_column: String,
}

/// Run the train/test pipeline with the default on-disk layout.
pub fn run_preprocess<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    run_preprocess_with(args_iter, PipelineConfig::default())
}

/// Run the train/test pipeline with `base` locations; the CLI only overrides
/// the column names.
pub fn run_preprocess_with<I>(args_iter: I, base: PipelineConfig) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) =
        parse_cli::<PreprocessCli, _>(std::iter::once("textprep".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    init_logging(&base)?;

    let mut config = base;
    config.preprocess.text_column = cli.text_column;
    config.preprocess.target_column = cli.target_column;

    let report = run_pipeline(&config, TracingDiagnostics::shared())?;
    print_report(&report);
    Ok(())
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

fn print_report(report: &PipelineReport) {
    println!("=== preprocessing complete ===");
    println!("label scope: {:?}", report.label_scope);
    print_dataset(&report.train);
    print_dataset(&report.test);
}

fn print_dataset(dataset: &DatasetReport) {
    let summary = &dataset.summary;
    println!(
        "{}: {} -> {} rows ({} duplicates, {} empty texts, {} failed) -> {}",
        dataset.split.as_str(),
        summary.input_rows,
        summary.output_rows,
        summary.duplicates_dropped,
        summary.empty_texts,
        summary.failed_rows,
        dataset.output_path.display()
    );
    if let Some(skew) = &summary.label_skew {
        for share in &skew.per_label {
            println!(
                "  label {}: {} rows ({:.1}%)",
                share.code,
                share.count,
                share.share * 100.0
            );
        }
    }
}
