//! Session configuration types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Shortest accepted poll interval
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 1;
/// Longest accepted poll interval
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 60;
/// Poll interval used when none is configured
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5;

/// Chart shape used for categorical columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    /// Vertical bars
    #[default]
    Bar,
    /// Horizontal bars
    BarHorizontal,
    /// Pie chart
    Pie,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::BarHorizontal => "barHorizontal",
            ChartKind::Pie => "pie",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(ChartKind::Bar),
            "barHorizontal" | "bar-horizontal" => Ok(ChartKind::BarHorizontal),
            "pie" => Ok(ChartKind::Pie),
            other => Err(format!(
                "unknown chart type '{}' (expected bar, barHorizontal or pie)",
                other
            )),
        }
    }
}

/// User intent for how the selected column is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DisplayModeOverride {
    /// Let the column classifier decide
    #[default]
    Auto,
    /// Always draw a chart
    Chart,
    /// Always draw the text cloud
    Text,
}

impl fmt::Display for DisplayModeOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DisplayModeOverride::Auto => "auto",
            DisplayModeOverride::Chart => "chart",
            DisplayModeOverride::Text => "text",
        })
    }
}

impl FromStr for DisplayModeOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(DisplayModeOverride::Auto),
            "chart" => Ok(DisplayModeOverride::Chart),
            "text" => Ok(DisplayModeOverride::Text),
            other => Err(format!(
                "unknown display mode '{}' (expected auto, chart or text)",
                other
            )),
        }
    }
}

fn default_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_auto_refresh() -> bool {
    true
}

/// Everything fixed at session start.
///
/// Changing any of it means ending the session and starting a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    /// Sheet endpoint serving `{ headers, rows }` JSON
    #[serde(default)]
    pub endpoint_url: String,
    /// Chart kind the session starts with
    #[serde(default)]
    pub chart_kind_default: ChartKind,
    /// Poll cadence in seconds
    #[serde(default = "default_interval")]
    pub refresh_interval_secs: u64,
    /// Whether recurring polls start enabled
    #[serde(default = "default_auto_refresh")]
    pub auto_refresh_enabled: bool,
}

impl DisplayConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            ..Self::default()
        }
    }

    /// Check the configuration before a session may start
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint_url.trim().is_empty() {
            return Err(ConfigError::EmptyUrl);
        }
        if !(MIN_REFRESH_INTERVAL_SECS..=MAX_REFRESH_INTERVAL_SECS)
            .contains(&self.refresh_interval_secs)
        {
            return Err(ConfigError::IntervalOutOfRange {
                value: self.refresh_interval_secs,
                min: MIN_REFRESH_INTERVAL_SECS,
                max: MAX_REFRESH_INTERVAL_SECS,
            });
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            chart_kind_default: ChartKind::default(),
            refresh_interval_secs: default_interval(),
            auto_refresh_enabled: default_auto_refresh(),
        }
    }
}
