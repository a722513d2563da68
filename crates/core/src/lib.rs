//! sheet-pulse-core: Core traits and column analysis for sheet-pulse.
//!
//! This crate contains the fetcher seam (`SnapshotSource`), the fixed design
//! constants, and the pure analysis steps that turn one column of a snapshot
//! into a rendering decision: classify, aggregate, resolve.

mod aggregator;
mod classifier;
pub mod constants;
mod display_mode;
mod observation;
mod source;

pub use aggregator::{aggregate, total_count};
pub use classifier::classify;
pub use display_mode::resolve;
pub use observation::{observe, observed_values};
pub use source::{SharedSnapshotSource, SnapshotSource, SourceMetadata};

// Re-export types used in function signatures for convenience
pub use sheet_pulse_types::{
    AggregatedEntry, DisplayModeOverride, EffectiveMode, FetchError, Snapshot, Verdict,
};
