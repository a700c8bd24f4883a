use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, Writer};

use crate::data::{Table, Value, infer_column};
use crate::errors::PreprocessError;

/// Load a CSV file with a header row into a [`Table`].
///
/// Columns are typed independently (see [`infer_column`]). A missing file is
/// `InputNotFound`; a file without a header is `EmptyInput`; a header-only file
/// is a valid zero-row table.
pub fn load_table(path: impl AsRef<Path>) -> Result<Table, PreprocessError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => PreprocessError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => PreprocessError::Io(err),
    })?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(PreprocessError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (column, field) in raw_columns.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
    }

    let typed_columns: Vec<Vec<Value>> = raw_columns
        .iter()
        .map(|cells| infer_column(cells.as_slice()))
        .collect();
    let row_count = typed_columns.first().map(Vec::len).unwrap_or(0);
    let mut columns: Vec<std::vec::IntoIter<Value>> =
        typed_columns.into_iter().map(Vec::into_iter).collect();

    let mut table = Table::new(headers.iter())?;
    for _ in 0..row_count {
        let values = columns.iter_mut().filter_map(|column| column.next()).collect();
        table.push_row(values)?;
    }
    Ok(table)
}

/// Write `table` as CSV with a header row and no index column.
pub fn save_table(table: &Table, path: impl AsRef<Path>) -> Result<(), PreprocessError> {
    let mut writer = Writer::from_path(path.as_ref())?;
    writer.write_record(table.column_names())?;
    for row in table.rows() {
        writer.write_record(row.values.iter().map(Value::to_field))?;
    }
    writer.flush()?;
    Ok(())
}
