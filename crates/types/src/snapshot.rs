//! Tabular snapshot types as delivered by the sheet endpoint

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// Header index reserved for the form's timestamp column.
///
/// The first column is never treated as data, regardless of what it holds.
pub const TIMESTAMP_COLUMN: usize = 0;

/// A single raw cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum RawValue {
    /// Text cell
    Text(String),
    /// Numeric cell
    Number(f64),
    /// Checkbox / boolean cell
    Bool(bool),
    /// Blank cell
    #[default]
    Empty,
}

impl RawValue {
    /// Render the cell the way the spreadsheet passthrough would print it.
    ///
    /// Blank cells render as an empty string; the result is not trimmed.
    pub fn to_text(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            RawValue::Number(n) => format_number(*n),
            RawValue::Bool(b) => b.to_string(),
            RawValue::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Empty,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => match n.as_f64() {
                Some(f) => RawValue::Number(f),
                None => RawValue::Text(n.to_string()),
            },
            Value::String(s) => RawValue::Text(s),
            // Nested structures only show up from hand-written endpoints
            other @ (Value::Array(_) | Value::Object(_)) => RawValue::Text(other.to_string()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// A data row, positionally aligned to the snapshot headers
pub type Row = Vec<RawValue>;

/// A selectable data column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    /// Index into the snapshot headers
    pub index: usize,
    /// Spreadsheet column letter (e.g. "B")
    pub letter: String,
    /// Header text (the form question)
    pub header: String,
}

/// One observed state of the remote sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Column names; index 0 is the timestamp column
    pub headers: Vec<String>,
    /// Data rows, each exactly `headers.len()` cells long
    pub rows: Vec<Row>,
    /// When this snapshot was received
    pub fetched_at: DateTime<Utc>,
    /// Row count as reported upstream, if any
    pub total_rows: Option<u64>,
    /// Upstream modification stamp, passed through untouched
    pub last_update: Option<String>,
}

impl Snapshot {
    /// Build a snapshot, padding short rows with blank cells and truncating long ones
    pub fn new(headers: Vec<String>, rows: Vec<Row>, fetched_at: DateTime<Utc>) -> Self {
        let width = headers.len();
        let mut padded = 0usize;
        let mut truncated = 0usize;

        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    padded += 1;
                    row.resize(width, RawValue::Empty);
                } else if row.len() > width {
                    truncated += 1;
                    row.truncate(width);
                }
                row
            })
            .collect();

        if padded > 0 || truncated > 0 {
            debug!(
                "Normalized snapshot rows: {} padded, {} truncated (width {})",
                padded, truncated, width
            );
        }

        Self {
            headers,
            rows,
            fetched_at,
            total_rows: None,
            last_update: None,
        }
    }

    /// Attach the optional upstream metadata
    pub fn with_upstream_meta(mut self, total_rows: Option<u64>, last_update: Option<String>) -> Self {
        self.total_rows = total_rows;
        self.last_update = last_update;
        self
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the sheet has a header row but no responses yet
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self, index: usize) -> Option<&str> {
        self.headers.get(index).map(String::as_str)
    }

    /// Validate a column selection against this snapshot
    pub fn check_column(&self, index: usize) -> Result<(), ConfigError> {
        if index < self.headers.len() {
            Ok(())
        } else {
            Err(ConfigError::ColumnOutOfRange {
                index,
                available: self.headers.len(),
            })
        }
    }

    /// Raw text of every cell in a column, in row order.
    ///
    /// An index past the last header yields blank strings for every row.
    pub fn column_values(&self, index: usize) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(RawValue::to_text).unwrap_or_default())
            .collect()
    }

    /// The columns a user can pick from (everything after the timestamp)
    pub fn data_columns(&self) -> Vec<ColumnInfo> {
        self.headers
            .iter()
            .enumerate()
            .skip(TIMESTAMP_COLUMN + 1)
            .map(|(index, header)| ColumnInfo {
                index,
                letter: column_letter(index),
                header: header.clone(),
            })
            .collect()
    }

    /// Column picked automatically on the first successful load
    pub fn default_column(&self) -> Option<usize> {
        (self.headers.len() > TIMESTAMP_COLUMN + 1).then_some(TIMESTAMP_COLUMN + 1)
    }
}

/// Spreadsheet-style letter for a zero-based column index (0 -> "A", 26 -> "AA")
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}
