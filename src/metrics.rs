use std::collections::HashMap;

use serde::Serialize;

use crate::types::LabelCode;

/// Aggregate balance metrics for per-label row counts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelSkew {
    /// Rows across all labels.
    pub total: usize,
    /// Distinct labels counted.
    pub labels: usize,
    /// Smallest per-label count.
    pub min: usize,
    /// Largest per-label count.
    pub max: usize,
    /// Mean rows per label.
    pub mean: f64,
    /// Share of rows held by the largest label.
    pub max_share: f64,
    /// Share of rows held by the smallest label.
    pub min_share: f64,
    /// `max / min`; infinite when some label has no rows.
    pub ratio: f64,
    /// Per-label breakdown.
    pub per_label: Vec<LabelShare>,
}

/// Per-label share of a table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelShare {
    /// Encoded label.
    pub code: LabelCode,
    /// Rows carrying the label.
    pub count: usize,
    /// Fraction of all rows.
    pub share: f64,
}

/// Compute balance metrics from per-label row counts.
///
/// Entries are ordered by descending count, then ascending code.
pub fn label_skew(counts: &HashMap<LabelCode, usize>) -> Option<LabelSkew> {
    let first = *counts.values().next()?;
    let (min, max) = counts
        .values()
        .fold((first, first), |(lo, hi), &count| (lo.min(count), hi.max(count)));
    let total: usize = counts.values().sum();
    let labels = counts.len();
    let share = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    };
    let ratio = if min == 0 {
        f64::INFINITY
    } else {
        max as f64 / min as f64
    };
    let mut per_label: Vec<LabelShare> = counts
        .iter()
        .map(|(code, count)| LabelShare {
            code: *code,
            count: *count,
            share: share(*count),
        })
        .collect();
    per_label.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));
    Some(LabelSkew {
        total,
        labels,
        min,
        max,
        mean: total as f64 / labels as f64,
        max_share: share(max),
        min_share: share(min),
        ratio,
        per_label,
    })
}
