//! Categorical label encoding.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::data::{Value, ValueKind};
use crate::errors::PreprocessError;
use crate::types::{LabelCode, RowId};

/// Maps each distinct raw label to a dense code in `[0, K)`, assigned in
/// sorted label order.
///
/// Integral floats and the matching integers are one label (`1.0` and `1`),
/// so tables typed differently on load still share codes.
#[derive(Clone, Debug, Default)]
pub struct LabelEncoder {
    classes: Vec<Value>,
    codes: HashMap<Value, LabelCode>,
}

impl LabelEncoder {
    /// Fit an encoder on `(row id, label)` pairs.
    ///
    /// Numeric labels sort numerically and text labels by code point. A
    /// missing label or a mix of text and numeric labels is an error. The
    /// first raw value seen for a label is kept as its class.
    pub fn fit<'a, I>(labels: I) -> Result<Self, PreprocessError>
    where
        I: IntoIterator<Item = (RowId, &'a Value)>,
    {
        let mut distinct: HashMap<Value, &Value> = HashMap::new();
        let mut first_kind: Option<ValueKind> = None;
        for (row, value) in labels {
            let kind = value.kind();
            if kind == ValueKind::Null {
                return Err(PreprocessError::MissingLabel { row });
            }
            match first_kind {
                None => first_kind = Some(kind),
                Some(seen) if is_text(seen) != is_text(kind) => {
                    return Err(PreprocessError::MixedLabelKinds {
                        first: seen.as_str(),
                        second: kind.as_str(),
                    });
                }
                Some(_) => {}
            }
            distinct.entry(label_key(value)).or_insert(value);
        }

        let mut classes: Vec<Value> = distinct.into_values().cloned().collect();
        classes.sort_by(compare_labels);
        let codes = classes
            .iter()
            .enumerate()
            .map(|(code, value)| (label_key(value), code as LabelCode))
            .collect();
        Ok(Self { classes, codes })
    }

    /// Code for `value`, or `UnknownLabel` if it was not seen during fit.
    pub fn transform(&self, value: &Value) -> Result<LabelCode, PreprocessError> {
        self.codes
            .get(&label_key(value))
            .copied()
            .ok_or_else(|| PreprocessError::UnknownLabel {
                label: value.to_string(),
            })
    }

    /// Raw label for `code`.
    pub fn inverse(&self, code: LabelCode) -> Option<&Value> {
        usize::try_from(code).ok().and_then(|idx| self.classes.get(idx))
    }

    /// Distinct labels in code order.
    pub fn classes(&self) -> &[Value] {
        &self.classes
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True when fit saw no labels.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

fn is_text(kind: ValueKind) -> bool {
    kind == ValueKind::Text
}

// Lookup key: integral floats within `i64` range collapse onto `Int`.
fn label_key(value: &Value) -> Value {
    match *value {
        Value::Float(float)
            if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 =>
        {
            Value::Int(float as i64)
        }
        _ => value.clone(),
    }
}

// Only called on non-null labels of one family (all text or all numeric).
fn compare_labels(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
        (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
        (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
        _ => left.kind().as_str().cmp(right.kind().as_str()),
    }
}
