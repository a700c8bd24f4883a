//! Process-wide `tracing` subscriber: INFO to the console, DEBUG to a log file.

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use crate::config::PipelineConfig;
use crate::errors::PreprocessError;

/// Install console and file logging for a run.
///
/// Creates the log directory when missing and appends to the log file. If a
/// global subscriber is already installed, the existing one is kept.
pub fn init_logging(config: &PipelineConfig) -> Result<(), PreprocessError> {
    fs::create_dir_all(&config.log_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())?;

    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_filter(LevelFilter::INFO);
    let file = fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .with_filter(LevelFilter::DEBUG);

    let _ = tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init();
    Ok(())
}
