//! Results of analysing a single column

use serde::{Deserialize, Serialize};

/// Whether a column looks like multiple choice or free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    /// Few distinct answers, at least one repeated
    Categorical,
    /// Mostly unique answers, or nothing to chart
    FreeText,
}

/// Rendering mode actually used for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectiveMode {
    Chart,
    Text,
}

/// One distinct answer and how often it was given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedEntry {
    /// Trimmed answer text
    pub label: String,
    /// Occurrences, always at least 1
    pub count: usize,
}

impl AggregatedEntry {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Datum handed to the chart renderer.
///
/// `value` and `count` carry the same number; consumers read either key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDatum {
    pub name: String,
    pub value: usize,
    pub count: usize,
}

impl From<&AggregatedEntry> for ChartDatum {
    fn from(entry: &AggregatedEntry) -> Self {
        Self {
            name: entry.label.clone(),
            value: entry.count,
            count: entry.count,
        }
    }
}
