//! Frame computation
//!
//! Turns Session State into what the presentation layer draws. Everything is
//! recomputed from scratch on each call; nothing is cached between renders.

use super::state::SessionState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sheet_pulse_core::{aggregate, classify, resolve};
use sheet_pulse_render::{layout_radial, ChartSeries, RadialLayout};
use sheet_pulse_types::{
    column_letter, ChartKind, ColumnInfo, DisplayModeOverride, EffectiveMode, Snapshot, Verdict,
};

/// Main area of a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum View {
    /// No snapshot has arrived yet
    Loading,
    /// Data is present but no column is selected
    NoColumn,
    /// The selected column has no observations
    NoData { column: ColumnInfo },
    Chart {
        column: ColumnInfo,
        verdict: Verdict,
        series: ChartSeries,
        #[serde(rename = "pieLabels", skip_serializing_if = "Vec::is_empty")]
        pie_labels: Vec<String>,
    },
    Text {
        column: ColumnInfo,
        verdict: Verdict,
        layout: RadialLayout,
    },
}

impl View {
    pub fn effective_mode(&self) -> Option<EffectiveMode> {
        match self {
            View::Chart { .. } => Some(EffectiveMode::Chart),
            View::Text { .. } => Some(EffectiveMode::Text),
            _ => None,
        }
    }
}

/// Everything one re-render shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub view: View,
    /// Selectable columns of the latest snapshot
    pub columns: Vec<ColumnInfo>,
    pub selected_column: Option<usize>,
    pub display_mode: DisplayModeOverride,
    pub chart_kind: ChartKind,
    /// Error banner text; shown above whatever data is still displayed
    pub last_error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub total_rows: Option<u64>,
    pub fetching: bool,
    pub auto_refresh: bool,
}

/// Compute the full frame for the current state
pub fn render_frame(state: &SessionState, auto_refresh: bool) -> Frame {
    let snapshot = state.latest_snapshot.as_ref();
    Frame {
        view: render_view(state),
        columns: snapshot.map(Snapshot::data_columns).unwrap_or_default(),
        selected_column: state.selected_column,
        display_mode: state.display_mode,
        chart_kind: state.chart_kind,
        last_error: state.last_error.as_ref().map(|e| e.to_string()),
        last_updated: snapshot.map(|s| s.fetched_at),
        total_rows: snapshot.and_then(|s| s.total_rows),
        fetching: state.is_fetch_in_flight,
        auto_refresh,
    }
}

/// Compute the main view: classify, aggregate and resolve the selected column
pub fn render_view(state: &SessionState) -> View {
    let Some(snapshot) = &state.latest_snapshot else {
        return View::Loading;
    };
    let Some(index) = state.selected_column else {
        return View::NoColumn;
    };
    if snapshot.check_column(index).is_err() {
        return View::NoColumn;
    }

    let column = ColumnInfo {
        index,
        letter: column_letter(index),
        header: snapshot.header(index).unwrap_or_default().to_string(),
    };

    let values = snapshot.column_values(index);
    let verdict = classify(&values);
    let entries = aggregate(&values);
    if entries.is_empty() {
        return View::NoData { column };
    }

    match resolve(state.display_mode, verdict) {
        EffectiveMode::Chart => {
            let series = ChartSeries::new(state.chart_kind, &entries);
            let pie_labels = match state.chart_kind {
                ChartKind::Pie => series.pie_labels(),
                _ => Vec::new(),
            };
            View::Chart {
                column,
                verdict,
                series,
                pie_labels,
            }
        }
        EffectiveMode::Text => match layout_radial(&entries) {
            Some(layout) => View::Text {
                column,
                verdict,
                layout,
            },
            None => View::NoData { column },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{sample_snapshot, snapshot_of};
    use sheet_pulse_types::FetchError;

    fn state_with(snapshot: Snapshot, column: usize) -> SessionState {
        let mut state = SessionState::new(ChartKind::Bar);
        state.latest_snapshot = Some(snapshot);
        state.selected_column = Some(column);
        state
    }

    #[test]
    fn test_loading_until_first_snapshot() {
        let state = SessionState::new(ChartKind::Bar);
        assert_eq!(render_view(&state), View::Loading);

        let frame = render_frame(&state, true);
        assert!(frame.columns.is_empty());
        assert_eq!(frame.last_updated, None);
    }

    #[test]
    fn test_no_column_selected() {
        let mut state = state_with(sample_snapshot(), 1);
        state.selected_column = None;
        assert_eq!(render_view(&state), View::NoColumn);

        state.selected_column = Some(9);
        assert_eq!(render_view(&state), View::NoColumn);
    }

    #[test]
    fn test_categorical_column_renders_chart() {
        let state = state_with(sample_snapshot(), 1);
        match render_view(&state) {
            View::Chart {
                column,
                verdict,
                series,
                pie_labels,
            } => {
                assert_eq!(column.letter, "B");
                assert_eq!(column.header, "Favourite colour");
                assert_eq!(verdict, Verdict::Categorical);
                assert_eq!(series.data[0].name, "Blue");
                assert_eq!(series.data[0].value, 3);
                assert_eq!(series.total, 4);
                assert!(pie_labels.is_empty());
            }
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn test_free_text_column_renders_layout() {
        let state = state_with(sample_snapshot(), 2);
        match render_view(&state) {
            View::Text { verdict, layout, .. } => {
                assert_eq!(verdict, Verdict::FreeText);
                assert_eq!(layout.total_count, 3);
                assert_eq!(layout.satellites.len(), 2);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_override_wins_over_verdict() {
        let mut state = state_with(sample_snapshot(), 1);
        state.display_mode = DisplayModeOverride::Text;
        assert_eq!(render_view(&state).effective_mode(), Some(EffectiveMode::Text));

        state.selected_column = Some(2);
        state.display_mode = DisplayModeOverride::Chart;
        assert_eq!(render_view(&state).effective_mode(), Some(EffectiveMode::Chart));
    }

    #[test]
    fn test_pie_labels_only_for_pie() {
        let mut state = state_with(sample_snapshot(), 1);
        state.chart_kind = ChartKind::Pie;
        match render_view(&state) {
            View::Chart { pie_labels, .. } => assert_eq!(pie_labels, vec!["75.0%", "25.0%"]),
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sheet_is_no_data() {
        let state = state_with(snapshot_of(&["Timestamp", "Q"], &[]), 1);
        assert!(matches!(render_view(&state), View::NoData { column } if column.index == 1));

        let blanks = state_with(snapshot_of(&["Timestamp", "Q"], &[&["t", " "], &["t", ""]]), 1);
        assert!(matches!(render_view(&blanks), View::NoData { .. }));
    }

    #[test]
    fn test_error_banner_keeps_data() {
        let mut state = state_with(sample_snapshot(), 1);
        state.last_error = Some(FetchError::Unreachable { status: 404 });

        let frame = render_frame(&state, false);
        assert!(matches!(frame.view, View::Chart { .. }));
        assert!(frame.last_error.unwrap().contains("404"));
        assert_eq!(frame.columns.len(), 2);
        assert!(frame.last_updated.is_some());
        assert!(!frame.auto_refresh);
    }

    #[test]
    fn test_frame_json_shape() {
        let state = state_with(sample_snapshot(), 1);
        let json = serde_json::to_value(render_frame(&state, true)).unwrap();
        assert_eq!(json["view"]["view"], "chart");
        assert_eq!(json["view"]["series"]["data"][0]["count"], 3);
        assert_eq!(json["columns"][1]["letter"], "C");
        assert_eq!(json["displayMode"], "auto");
        assert_eq!(json["chartKind"], "bar");
        assert_eq!(json["autoRefresh"], true);
    }
}
