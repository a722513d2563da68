//! sheet-pulse-types: Shared data types for sheet-pulse.
//!
//! This crate contains pure data types (snapshots, configuration, analysis
//! results, error taxonomy) that are shared across all sheet-pulse crates.
//! Nothing here performs I/O, making it suitable as a foundation layer.

pub mod analysis;
pub mod config;
pub mod error;
pub mod snapshot;

// Re-export commonly used types at the crate root for convenience
pub use analysis::{AggregatedEntry, ChartDatum, EffectiveMode, Verdict};
pub use config::{
    ChartKind, DisplayConfig, DisplayModeOverride, DEFAULT_REFRESH_INTERVAL_SECS,
    MAX_REFRESH_INTERVAL_SECS, MIN_REFRESH_INTERVAL_SECS,
};
pub use error::{ConfigError, FetchError};
pub use snapshot::{column_letter, ColumnInfo, RawValue, Row, Snapshot, TIMESTAMP_COLUMN};
