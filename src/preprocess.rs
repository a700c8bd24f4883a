//! Per-table preprocessing: encode labels, drop duplicates, normalize text.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::Level;

use crate::config::{DedupKey, PreprocessConfig};
use crate::constants::preprocess::COMPONENT;
use crate::data::{Table, Value};
use crate::diagnostics::SharedDiagnostics;
use crate::errors::PreprocessError;
use crate::labels::LabelEncoder;
use crate::metrics::{LabelSkew, label_skew};
use crate::normalize::{EnglishStemmer, NormalizeStatus, StemmerFactory, TextNormalizer};
use crate::types::LabelCode;

/// Row accounting for one preprocessed table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PreprocessSummary {
    /// Rows in the input table.
    pub input_rows: usize,
    /// Rows in the returned table.
    pub output_rows: usize,
    /// Rows removed by deduplication.
    pub duplicates_dropped: usize,
    /// Rows whose normalized text is empty (for any reason).
    pub empty_texts: usize,
    /// Rows whose text cell was not a string.
    pub non_text_rows: usize,
    /// Rows whose normalization failed.
    pub failed_rows: usize,
    /// Raw labels in code order.
    pub classes: Vec<String>,
    /// Label balance of the returned table.
    pub label_skew: Option<LabelSkew>,
}

/// Applies label encoding, deduplication, and text normalization to tables.
///
/// Input tables are borrowed and never modified; every call returns a new
/// table and builds its own encoder.
pub struct Preprocessor<F = EnglishStemmer> {
    config: PreprocessConfig,
    normalizer: TextNormalizer<F>,
    diagnostics: SharedDiagnostics,
}

impl Preprocessor<EnglishStemmer> {
    /// English normalizer with the given configuration.
    pub fn new(
        config: PreprocessConfig,
        diagnostics: SharedDiagnostics,
    ) -> Result<Self, PreprocessError> {
        let normalizer = TextNormalizer::new(diagnostics.clone());
        Self::with_normalizer(config, normalizer, diagnostics)
    }
}

impl<F: StemmerFactory> Preprocessor<F> {
    /// Use a caller-built normalizer.
    pub fn with_normalizer(
        config: PreprocessConfig,
        normalizer: TextNormalizer<F>,
        diagnostics: SharedDiagnostics,
    ) -> Result<Self, PreprocessError> {
        Ok(Self {
            config: config.validated()?,
            normalizer,
            diagnostics,
        })
    }

    /// Validated configuration.
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Preprocess `table` with a label encoder fit on its own target column.
    pub fn preprocess(&self, table: &Table) -> Result<Table, PreprocessError> {
        self.preprocess_with_summary(table).map(|(table, _)| table)
    }

    /// Like [`Preprocessor::preprocess`], also returning row accounting.
    pub fn preprocess_with_summary(
        &self,
        table: &Table,
    ) -> Result<(Table, PreprocessSummary), PreprocessError> {
        self.run(table, None)
    }

    /// Preprocess `table` with a caller-supplied encoder (for shared label codes).
    pub fn preprocess_with_encoder(
        &self,
        table: &Table,
        encoder: &LabelEncoder,
    ) -> Result<(Table, PreprocessSummary), PreprocessError> {
        self.run(table, Some(encoder))
    }

    /// Fit one encoder on the target columns of every table in `tables`.
    pub fn fit_shared_encoder(&self, tables: &[&Table]) -> Result<LabelEncoder, PreprocessError> {
        let mut columns = Vec::with_capacity(tables.len());
        for table in tables {
            let index = table
                .require_column(&self.config.target_column)
                .map_err(|err| self.report_failure(err))?;
            columns.push((*table, index));
        }
        let encoder = LabelEncoder::fit(columns.into_iter().flat_map(|(table, index)| {
            table
                .rows()
                .iter()
                .map(move |row| (row.id, &row.values[index]))
        }))
        .map_err(|err| self.report_failure(err))?;
        self.record(
            Level::INFO,
            format!("shared label encoder fit ({} classes)", encoder.len()),
        );
        Ok(encoder)
    }

    fn run(
        &self,
        table: &Table,
        shared: Option<&LabelEncoder>,
    ) -> Result<(Table, PreprocessSummary), PreprocessError> {
        self.record(Level::INFO, "preprocessing started".to_string());
        self.run_steps(table, shared)
            .map_err(|err| self.report_failure(err))
    }

    fn run_steps(
        &self,
        table: &Table,
        shared: Option<&LabelEncoder>,
    ) -> Result<(Table, PreprocessSummary), PreprocessError> {
        let text_index = table.require_column(&self.config.text_column)?;
        let target_index = table.require_column(&self.config.target_column)?;

        let fitted;
        let encoder = match shared {
            Some(encoder) => encoder,
            None => {
                fitted = LabelEncoder::fit(
                    table
                        .rows()
                        .iter()
                        .map(|row| (row.id, &row.values[target_index])),
                )?;
                &fitted
            }
        };
        let mut output = table.clone();
        for row in output.rows_mut() {
            let code = encoder.transform(&row.values[target_index])?;
            row.values[target_index] = Value::Int(code);
        }
        self.record(
            Level::INFO,
            format!("target column encoded ({} classes)", encoder.len()),
        );

        let input_rows = output.len();
        let key_columns: Vec<usize> = match self.config.dedup_key {
            DedupKey::TextAndTarget => vec![text_index, target_index],
            DedupKey::FullRow => (0..output.column_count()).collect(),
        };
        let mut seen: HashSet<Vec<Value>> = HashSet::with_capacity(input_rows);
        output.retain_rows(|row| {
            seen.insert(
                key_columns
                    .iter()
                    .map(|&index| row.values[index].clone())
                    .collect(),
            )
        });
        let duplicates_dropped = input_rows - output.len();
        self.record(
            Level::INFO,
            format!(
                "duplicates removed ({duplicates_dropped} dropped, {} remaining)",
                output.len()
            ),
        );

        let mut empty_texts = 0;
        let mut non_text_rows = 0;
        let mut failed_rows = 0;
        let mut label_counts: HashMap<LabelCode, usize> = HashMap::new();
        for row in output.rows_mut() {
            let outcome = self.normalizer.normalize_row(row.id, &row.values[text_index]);
            match outcome.status {
                NormalizeStatus::Normalized => {}
                NormalizeStatus::NonText => non_text_rows += 1,
                NormalizeStatus::Failed => failed_rows += 1,
            }
            if outcome.text.is_empty() {
                empty_texts += 1;
            }
            row.values[text_index] = Value::Text(outcome.text);
            if let Some(code) = row.values[target_index].as_int() {
                *label_counts.entry(code).or_insert(0) += 1;
            }
            if row.id % self.config.progress_interval == 0 {
                self.record(Level::DEBUG, format!("transformed {} rows...", row.id));
            }
        }
        self.record(
            Level::INFO,
            format!(
                "text column transformed ({empty_texts} empty, {non_text_rows} non-string, {failed_rows} failed)"
            ),
        );

        let summary = PreprocessSummary {
            input_rows,
            output_rows: output.len(),
            duplicates_dropped,
            empty_texts,
            non_text_rows,
            failed_rows,
            classes: encoder.classes().iter().map(Value::to_string).collect(),
            label_skew: label_skew(&label_counts),
        };
        Ok((output, summary))
    }

    fn report_failure(&self, err: PreprocessError) -> PreprocessError {
        let message = match &err {
            PreprocessError::ColumnNotFound { column } => format!("column not found: '{column}'"),
            other => format!("an error occurred during preprocessing: {other}"),
        };
        self.record(Level::ERROR, message);
        err
    }

    fn record(&self, level: Level, message: String) {
        self.diagnostics.record(level, COMPONENT, &message);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::diagnostics::MemoryDiagnostics;

    fn text_table(rows: &[(&str, &str, &str)]) -> Table {
        Table::from_rows(
            ["text", "target", "source"],
            rows.iter()
                .map(|(text, target, source)| {
                    vec![Value::text(*text), Value::text(*target), Value::text(*source)]
                })
                .collect(),
        )
        .unwrap()
    }

    fn preprocessor(config: PreprocessConfig) -> (Preprocessor, Arc<MemoryDiagnostics>) {
        let diagnostics = Arc::new(MemoryDiagnostics::new());
        let preprocessor = Preprocessor::new(config, diagnostics.clone()).unwrap();
        (preprocessor, diagnostics)
    }

    #[test]
    fn steps_are_logged_in_order() {
        let (preprocessor, diagnostics) = preprocessor(PreprocessConfig::default());
        let table = text_table(&[("Cats running", "spam", "a")]);
        preprocessor.preprocess(&table).unwrap();

        let infos: Vec<String> = diagnostics
            .at_level(Level::INFO)
            .into_iter()
            .map(|event| event.message)
            .collect();
        assert_eq!(infos.len(), 4);
        assert!(infos[0].starts_with("preprocessing started"));
        assert!(infos[1].starts_with("target column encoded"));
        assert!(infos[2].starts_with("duplicates removed"));
        assert!(infos[3].starts_with("text column transformed"));
    }

    #[test]
    fn progress_events_follow_row_ids() {
        let (preprocessor, diagnostics) = preprocessor(PreprocessConfig {
            progress_interval: 2,
            ..PreprocessConfig::default()
        });
        let table = text_table(&[
            ("one", "a", "x"),
            ("two", "a", "x"),
            ("two", "a", "x"),
            ("three", "b", "x"),
            ("four", "b", "x"),
        ]);
        let output = preprocessor.preprocess(&table).unwrap();
        let ids: Vec<usize> = output.rows().iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![0, 1, 3, 4]);

        let progress: Vec<String> = diagnostics
            .at_level(Level::DEBUG)
            .into_iter()
            .map(|event| event.message)
            .collect();
        assert_eq!(progress, vec!["transformed 0 rows...", "transformed 4 rows..."]);
    }

    #[test]
    fn text_and_target_key_ignores_other_columns() {
        let (preprocessor, _) = preprocessor(PreprocessConfig::default());
        let table = text_table(&[("same", "a", "first"), ("same", "a", "second")]);
        let output = preprocessor.preprocess(&table).unwrap();
        assert_eq!(output.len(), 1);
        assert_eq!(output.get(0, "source"), Some(&Value::text("first")));
    }

    #[test]
    fn full_row_key_keeps_rows_that_differ_elsewhere() {
        let (preprocessor, _) = preprocessor(PreprocessConfig {
            dedup_key: DedupKey::FullRow,
            ..PreprocessConfig::default()
        });
        let table = text_table(&[
            ("same", "a", "first"),
            ("same", "a", "second"),
            ("same", "a", "first"),
        ]);
        let output = preprocessor.preprocess(&table).unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output.get(1, "source"), Some(&Value::text("second")));
    }

    #[test]
    fn dedup_compares_raw_text_not_normalized_text() {
        let (preprocessor, _) = preprocessor(PreprocessConfig::default());
        let table = text_table(&[("Running cats", "a", "x"), ("running cat", "a", "x")]);
        let output = preprocessor.preprocess(&table).unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output.get(0, "text"), output.get(1, "text"));
    }

    #[test]
    fn summary_counts_rows() {
        let (preprocessor, _) = preprocessor(PreprocessConfig::default());
        let mut table = text_table(&[
            ("Hello world", "spam", "a"),
            ("Hello world", "spam", "b"),
            ("the and of", "ham", "c"),
        ]);
        table
            .push_row(vec![Value::Int(7), Value::text("ham"), Value::text("d")])
            .unwrap();

        let (_, summary) = preprocessor.preprocess_with_summary(&table).unwrap();
        assert_eq!(summary.input_rows, 4);
        assert_eq!(summary.output_rows, 3);
        assert_eq!(summary.duplicates_dropped, 1);
        assert_eq!(summary.empty_texts, 2);
        assert_eq!(summary.non_text_rows, 1);
        assert_eq!(summary.failed_rows, 0);
        assert_eq!(summary.classes, vec!["ham".to_string(), "spam".to_string()]);
        let skew = summary.label_skew.expect("skew");
        assert_eq!(skew.per_label[0].code, 0);
        assert_eq!(skew.per_label[0].count, 2);
    }

    #[test]
    fn shared_encoder_spans_tables() {
        let (preprocessor, _) = preprocessor(PreprocessConfig::default());
        let train = text_table(&[("alpha", "spam", "a"), ("beta", "spam", "a")]);
        let test = text_table(&[("gamma", "ham", "a")]);

        let encoder = preprocessor.fit_shared_encoder(&[&train, &test]).unwrap();
        let (train_out, _) = preprocessor.preprocess_with_encoder(&train, &encoder).unwrap();
        let (test_out, _) = preprocessor.preprocess_with_encoder(&test, &encoder).unwrap();
        assert_eq!(train_out.get(0, "target"), Some(&Value::Int(1)));
        assert_eq!(test_out.get(0, "target"), Some(&Value::Int(0)));

        // Per-table encoders give both single-label tables code 0.
        let train_alone = preprocessor.preprocess(&train).unwrap();
        assert_eq!(train_alone.get(0, "target"), Some(&Value::Int(0)));
    }

    #[test]
    fn shared_encoder_unifies_int_and_float_columns() {
        let (preprocessor, _) = preprocessor(PreprocessConfig::default());
        let train = Table::from_rows(
            ["text", "target"],
            vec![
                vec![Value::text("free prize"), Value::Int(1)],
                vec![Value::text("see you"), Value::Int(0)],
            ],
        )
        .unwrap();
        let test = Table::from_rows(
            ["text", "target"],
            vec![
                vec![Value::text("claim prize"), Value::Float(1.0)],
                vec![Value::text("lunch later"), Value::Float(0.0)],
            ],
        )
        .unwrap();

        let encoder = preprocessor.fit_shared_encoder(&[&train, &test]).unwrap();
        assert_eq!(encoder.len(), 2);
        let (test_out, summary) = preprocessor.preprocess_with_encoder(&test, &encoder).unwrap();
        assert_eq!(test_out.get(0, "target"), Some(&Value::Int(1)));
        assert_eq!(test_out.get(1, "target"), Some(&Value::Int(0)));
        assert_eq!(summary.classes.len(), 2);
    }

    #[test]
    fn missing_label_is_fatal_and_logged() {
        let (preprocessor, diagnostics) = preprocessor(PreprocessConfig::default());
        let table = Table::from_rows(
            ["text", "target"],
            vec![
                vec![Value::text("fine"), Value::text("ham")],
                vec![Value::text("broken"), Value::Null],
            ],
        )
        .unwrap();
        let err = preprocessor.preprocess(&table).unwrap_err();
        assert!(matches!(err, PreprocessError::MissingLabel { row: 1 }));
        assert!(diagnostics.contains(Level::ERROR, "target value is missing at row 1"));
    }

    #[test]
    fn custom_column_names_are_honored() {
        let (preprocessor, _) = preprocessor(PreprocessConfig {
            text_column: "body".to_string(),
            target_column: "label".to_string(),
            ..PreprocessConfig::default()
        });
        let table = Table::from_rows(
            ["label", "body"],
            vec![vec![Value::Int(5), Value::text("Jumping dogs")]],
        )
        .unwrap();
        let output = preprocessor.preprocess(&table).unwrap();
        assert_eq!(output.get(0, "label"), Some(&Value::Int(0)));
        assert_eq!(output.get(0, "body"), Some(&Value::text("jump dog")));
    }
}
