//! Chart adapter: ranked entries in the shape chart libraries expect

use serde::Serialize;
use sheet_pulse_types::{AggregatedEntry, ChartDatum, ChartKind};

/// Data for one bar or pie chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub data: Vec<ChartDatum>,
    pub total: usize,
}

impl ChartSeries {
    /// Build a series from ranked entries, keeping their order
    pub fn new(kind: ChartKind, entries: &[AggregatedEntry]) -> Self {
        let data: Vec<ChartDatum> = entries.iter().map(ChartDatum::from).collect();
        let total = data.iter().map(|d| d.value).sum();
        Self { kind, data, total }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Share of datum `index` in percent, rounded to one decimal
    pub fn share_percent(&self, index: usize) -> Option<f64> {
        let datum = self.data.get(index)?;
        if self.total == 0 {
            return None;
        }
        let percent = datum.value as f64 / self.total as f64 * 100.0;
        Some((percent * 10.0).round() / 10.0)
    }

    /// Slice labels for a pie chart ("42.9%")
    pub fn pie_labels(&self) -> Vec<String> {
        (0..self.data.len())
            .map(|i| format!("{:.1}%", self.share_percent(i).unwrap_or(0.0)))
            .collect()
    }
}
