//! Test doubles for scheduler and session tests

use async_trait::async_trait;
use chrono::Utc;
use sheet_pulse_core::{SnapshotSource, SourceMetadata};
use sheet_pulse_types::{FetchError, RawValue, Snapshot};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// In-memory source that replays queued outcomes.
///
/// When gated, each fetch blocks until the test releases a permit.
pub struct ScriptedSource {
    metadata: SourceMetadata,
    calls: AtomicUsize,
    queue: Mutex<VecDeque<Result<Snapshot, FetchError>>>,
    fallback: Snapshot,
    gate: Option<Semaphore>,
}

impl ScriptedSource {
    fn build(gate: Option<Semaphore>) -> Arc<Self> {
        Arc::new(Self {
            metadata: SourceMetadata {
                id: "scripted".to_string(),
                location: "memory".to_string(),
            },
            calls: AtomicUsize::new(0),
            queue: Mutex::new(VecDeque::new()),
            fallback: sample_snapshot(),
            gate,
        })
    }

    /// Every fetch completes immediately
    pub fn ready() -> Arc<Self> {
        Self::build(None)
    }

    /// Every fetch waits for `release`
    pub fn gated() -> Arc<Self> {
        Self::build(Some(Semaphore::new(0)))
    }

    /// Queue the outcome of a future fetch
    pub fn push(&self, outcome: Result<Snapshot, FetchError>) {
        self.queue.lock().unwrap().push_back(outcome);
    }

    /// Let `n` pending or future fetches complete
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotSource for ScriptedSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        let queued = self.queue.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// Build a snapshot from string cells
pub fn snapshot_of(headers: &[&str], rows: &[&[&str]]) -> Snapshot {
    Snapshot::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|c| RawValue::Text(c.to_string())).collect())
            .collect(),
        Utc::now(),
    )
}

/// A small form-responses sheet: one categorical and one free-text question
pub fn sample_snapshot() -> Snapshot {
    snapshot_of(
        &["Timestamp", "Favourite colour", "Comments"],
        &[
            &["t1", "Blue", "Loved the talk"],
            &["t2", "Red", "Too long"],
            &["t3", "Blue", "More demos please"],
            &["t4", " Blue ", ""],
        ],
    )
}

/// Let spawned tasks run to their next suspension point
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
