use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::tempdir;
use tracing::Level;

use textprep::{
    LabelScope, MemoryDiagnostics, PipelineConfig, PreprocessError, Value, load_table,
    run_pipeline,
};

fn write_raw(root: &Path, train: &str, test: &str) -> PipelineConfig {
    let config = PipelineConfig::rooted_at(root);
    fs::create_dir_all(&config.raw_dir).unwrap();
    fs::write(config.train_input_path(), train).unwrap();
    fs::write(config.test_input_path(), test).unwrap();
    config
}

const TRAIN_CSV: &str = "\
target,text
spam,\"WINNER!! Claim your prize, call now\"
ham,Are you coming to the meeting?
spam,\"WINNER!! Claim your prize, call now\"
ham,
";

const TEST_CSV: &str = "\
target,text
ham,Running late for dinner
other,Meeting moved to Friday
";

#[test]
fn pipeline_writes_processed_tables() {
    let temp = tempdir().unwrap();
    let config = write_raw(temp.path(), TRAIN_CSV, TEST_CSV);
    let diagnostics = Arc::new(MemoryDiagnostics::new());

    let report = run_pipeline(&config, diagnostics.clone()).unwrap();
    assert_eq!(report.train.summary.input_rows, 4);
    assert_eq!(report.train.summary.output_rows, 3);
    assert_eq!(report.train.summary.duplicates_dropped, 1);
    assert_eq!(report.train.summary.non_text_rows, 1);

    let train = load_table(config.train_output_path()).unwrap();
    assert_eq!(train.column_names().collect::<Vec<_>>(), vec!["target", "text"]);
    assert_eq!(train.len(), 3);
    assert_eq!(train.get(0, "target"), Some(&Value::Int(1)));
    assert_eq!(train.get(0, "text"), Some(&Value::text("winner claim prize call")));
    assert_eq!(train.get(1, "text"), Some(&Value::text("come meet")));
    // An empty normalized text is read back as missing.
    assert_eq!(train.get(2, "text"), Some(&Value::Null));

    let written = fs::read_to_string(config.train_output_path()).unwrap();
    assert_eq!(
        written,
        "target,text\n1,winner claim prize call\n0,come meet\n0,\n"
    );

    let test = load_table(config.test_output_path()).unwrap();
    assert_eq!(test.get(0, "target"), Some(&Value::Int(0)));
    assert_eq!(test.get(1, "target"), Some(&Value::Int(1)));
    assert!(diagnostics.contains(Level::INFO, "processed data saved to"));
}

#[test]
fn shared_scope_uses_one_code_per_label() {
    let temp = tempdir().unwrap();
    let mut config = write_raw(temp.path(), TRAIN_CSV, TEST_CSV);
    config.label_scope = LabelScope::Shared;

    let report = run_pipeline(&config, Arc::new(MemoryDiagnostics::new())).unwrap();
    assert_eq!(report.train.summary.classes, vec!["ham", "other", "spam"]);

    let train = load_table(config.train_output_path()).unwrap();
    let test = load_table(config.test_output_path()).unwrap();
    assert_eq!(train.get(0, "target"), Some(&Value::Int(2)));
    assert_eq!(train.get(1, "target"), Some(&Value::Int(0)));
    assert_eq!(test.get(0, "target"), Some(&Value::Int(0)));
    assert_eq!(test.get(1, "target"), Some(&Value::Int(1)));
}

#[test]
fn header_only_inputs_produce_header_only_outputs() {
    let temp = tempdir().unwrap();
    let config = write_raw(temp.path(), "text,target\n", "text,target\n");
    let report = run_pipeline(&config, Arc::new(MemoryDiagnostics::new())).unwrap();
    assert_eq!(report.train.summary.output_rows, 0);
    assert_eq!(
        fs::read_to_string(config.test_output_path()).unwrap(),
        "text,target\n"
    );
}

#[test]
fn missing_input_aborts_before_writing() {
    let temp = tempdir().unwrap();
    let config = PipelineConfig::rooted_at(temp.path());
    let diagnostics = Arc::new(MemoryDiagnostics::new());

    let err = run_pipeline(&config, diagnostics.clone()).unwrap_err();
    assert!(matches!(err, PreprocessError::InputNotFound { .. }));
    assert!(diagnostics.contains(Level::ERROR, "file not found"));
    assert!(!config.output_dir.exists());
}

#[test]
fn missing_column_in_test_aborts_run() {
    let temp = tempdir().unwrap();
    let config = write_raw(temp.path(), TRAIN_CSV, "label,text\nham,hello\n");
    let diagnostics = Arc::new(MemoryDiagnostics::new());

    let err = run_pipeline(&config, diagnostics.clone()).unwrap_err();
    assert!(matches!(err, PreprocessError::ColumnNotFound { .. }));
    assert!(diagnostics.contains(Level::ERROR, "processing failed"));
    assert!(!config.train_output_path().exists());
}

#[test]
fn empty_input_file_is_reported() {
    let temp = tempdir().unwrap();
    let config = write_raw(temp.path(), "", TEST_CSV);
    let diagnostics = Arc::new(MemoryDiagnostics::new());

    let err = run_pipeline(&config, diagnostics.clone()).unwrap_err();
    assert!(matches!(err, PreprocessError::EmptyInput { .. }));
    assert!(diagnostics.contains(Level::ERROR, "empty CSV file"));
}
