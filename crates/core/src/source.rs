//! Snapshot source trait and related types

use async_trait::async_trait;
use sheet_pulse_types::{FetchError, Snapshot};
use std::sync::Arc;

/// Metadata about a snapshot source
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// Short identifier for the source kind ("http", "file", ...)
    pub id: String,
    /// Human-readable description of where snapshots come from
    pub location: String,
}

/// Trait for everything that can produce a sheet snapshot
///
/// One call is one observation: implementations must not cache, retry or
/// panic. Every failure comes back as a [`FetchError`]; retrying is the
/// scheduler's job.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Get metadata about this source
    fn metadata(&self) -> &SourceMetadata;

    /// Retrieve the current state of the sheet
    async fn fetch(&self) -> Result<Snapshot, FetchError>;
}

/// Shared handle used by schedulers that spawn fetch tasks
pub type SharedSnapshotSource = Arc<dyn SnapshotSource>;
