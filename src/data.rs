use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::data::NULL_LITERALS;
use crate::errors::PreprocessError;

pub use crate::types::{ColumnName, LabelCode, RowId};

/// A single table cell.
///
/// Floats are never NaN: missing values are `Null`, which keeps equality,
/// hashing, and label ordering total.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing cell.
    Null,
    /// Whole number.
    Int(i64),
    /// Finite floating-point number.
    Float(f64),
    /// Free text.
    Text(String),
}

/// Kind tag for a cell value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `Value::Null`.
    Null,
    /// `Value::Int`.
    Int,
    /// `Value::Float`.
    Float,
    /// `Value::Text`.
    Text,
}

impl ValueKind {
    /// Lowercase name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
        }
    }
}

impl Value {
    /// Build a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// Kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Borrowed text, if this is `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Integer, if this is `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// True for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render the cell the way it is written to a CSV field.
    pub fn to_field(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

// -0.0 and 0.0 compare equal, so they must hash the same.
fn float_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_bits(*a) == float_bits(*b),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Value::Null => {}
            Value::Int(value) => value.hash(state),
            Value::Float(value) => float_bits(*value).hash(state),
            Value::Text(value) => value.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 => {
                write!(f, "{value:.1}")
            }
            Value::Float(value) => write!(f, "{value}"),
            Value::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Value::Null
        } else {
            Value::Float(value)
        }
    }
}

/// True if a raw cell should be read as a missing value.
pub fn is_null_literal(raw: &str) -> bool {
    NULL_LITERALS.contains(&raw)
}

/// Type one column of raw cells.
///
/// Missing-value literals become `Null`. The column is integer if every other
/// cell parses as `i64`, float if every other cell parses as a non-NaN `f64`,
/// and text otherwise.
pub fn infer_column<S: AsRef<str>>(cells: &[S]) -> Vec<Value> {
    let present = || {
        cells
            .iter()
            .map(|raw| raw.as_ref())
            .filter(|raw| !is_null_literal(raw))
    };
    let all_int = present().all(|raw| raw.parse::<i64>().is_ok());
    let all_float = all_int
        || present().all(|raw| raw.parse::<f64>().map(|v| !v.is_nan()).unwrap_or(false));

    cells
        .iter()
        .map(|raw| raw.as_ref())
        .map(|raw| {
            if is_null_literal(raw) {
                return Value::Null;
            }
            if all_int {
                if let Ok(value) = raw.parse::<i64>() {
                    return Value::Int(value);
                }
            }
            if all_float {
                if let Ok(value) = raw.parse::<f64>() {
                    return Value::from(value);
                }
            }
            Value::Text(raw.to_string())
        })
        .collect()
}

/// One table row: its original position plus one value per column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Position of this row in the table it was loaded from.
    pub id: RowId,
    /// Cells in column order.
    pub values: Vec<Value>,
}

/// An ordered, in-memory table with a fixed set of uniquely named columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    columns: IndexMap<ColumnName, usize>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Result<Self, PreprocessError>
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnName>,
    {
        let mut index = IndexMap::new();
        for name in columns {
            let name = name.into();
            let position = index.len();
            if index.contains_key(&name) {
                return Err(PreprocessError::DuplicateColumn { column: name });
            }
            index.insert(name, position);
        }
        Ok(Self {
            columns: index,
            rows: Vec::new(),
        })
    }

    /// Create a table and append `rows` with consecutive row ids.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Result<Self, PreprocessError>
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnName>,
    {
        let mut table = Self::new(columns)?;
        for values in rows {
            table.push_row(values)?;
        }
        Ok(table)
    }

    /// Append a row; its id is one past the last row id (or 0).
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<RowId, PreprocessError> {
        let id = self.rows.last().map(|row| row.id + 1).unwrap_or(0);
        if values.len() != self.columns.len() {
            return Err(PreprocessError::RowWidth {
                row: id,
                expected: self.columns.len(),
                found: values.len(),
            });
        }
        self.rows.push(Row { id, values });
        Ok(id)
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of column `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// Column position, or `ColumnNotFound`.
    pub fn require_column(&self, name: &str) -> Result<usize, PreprocessError> {
        self.column_index(name)
            .ok_or_else(|| PreprocessError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>, PreprocessError> {
        let index = self.require_column(name)?;
        Ok(self.rows.iter().map(|row| &row.values[index]).collect())
    }

    /// Value at `position` (not row id) in column `name`.
    pub fn get(&self, position: usize, name: &str) -> Option<&Value> {
        let index = self.column_index(name)?;
        self.rows.get(position).map(|row| &row.values[index])
    }

    /// Keep only rows for which `keep` returns true, preserving order.
    pub(crate) fn retain_rows(&mut self, keep: impl FnMut(&Row) -> bool) {
        self.rows.retain(keep);
    }
}
