//! Session state and its shared store
//!
//! Ownership of fields is split: only the scheduler writes
//! `latest_snapshot`, `last_error` and `is_fetch_in_flight`; only user
//! interaction writes the column selection, display mode and chart kind.

use log::{debug, info};
use sheet_pulse_types::{ChartKind, ConfigError, DisplayModeOverride, FetchError, Snapshot};
use std::sync::Arc;
use tokio::sync::{watch, RwLock, RwLockReadGuard};
use tokio_util::sync::CancellationToken;

/// Everything a running session knows
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Last successfully fetched snapshot
    pub latest_snapshot: Option<Snapshot>,
    /// Header index of the displayed column
    pub selected_column: Option<usize>,
    pub display_mode: DisplayModeOverride,
    pub chart_kind: ChartKind,
    /// Cause of the most recent failed fetch, cleared by the next success
    pub last_error: Option<FetchError>,
    pub is_fetch_in_flight: bool,
}

impl SessionState {
    pub fn new(chart_kind: ChartKind) -> Self {
        Self {
            latest_snapshot: None,
            selected_column: None,
            display_mode: DisplayModeOverride::default(),
            chart_kind,
            last_error: None,
            is_fetch_in_flight: false,
        }
    }

    /// Replace the snapshot after a successful fetch
    pub(crate) fn apply_snapshot(&mut self, snapshot: Snapshot) {
        if self.selected_column.is_none() {
            self.selected_column = snapshot.default_column();
            if let Some(index) = self.selected_column {
                debug!("Auto-selected column {}", index);
            }
        }
        self.latest_snapshot = Some(snapshot);
        self.last_error = None;
    }

    /// Record a failed fetch; the previous snapshot stays visible
    pub(crate) fn apply_error(&mut self, error: FetchError) {
        self.last_error = Some(error);
    }

    /// Select a column, validated against the latest snapshot
    pub fn select_column(&mut self, index: usize) -> Result<(), ConfigError> {
        match &self.latest_snapshot {
            Some(snapshot) => snapshot.check_column(index)?,
            None => {
                return Err(ConfigError::ColumnOutOfRange {
                    index,
                    available: 0,
                })
            }
        }
        self.selected_column = Some(index);
        Ok(())
    }
}

/// Shared, versioned holder for one session's state.
///
/// Every mutation bumps a revision counter so presenters know to redraw.
pub struct SessionStore {
    state: RwLock<SessionState>,
    revision: watch::Sender<u64>,
}

impl SessionStore {
    pub fn new(state: SessionState) -> Arc<Self> {
        let (revision, _) = watch::channel(0);
        Arc::new(Self {
            state: RwLock::new(state),
            revision,
        })
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().await
    }

    /// Clone of the current state
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Mutate the state under the write lock and publish a new revision
    pub async fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let result = {
            let mut state = self.state.write().await;
            f(&mut state)
        };
        self.bump();
        result
    }

    /// Claim the single fetch slot. Returns false if a fetch is already out.
    pub(crate) async fn try_begin_fetch(&self) -> bool {
        {
            let mut state = self.state.write().await;
            if state.is_fetch_in_flight {
                return false;
            }
            state.is_fetch_in_flight = true;
        }
        self.bump();
        true
    }

    /// Apply a completed fetch and release the fetch slot in one step.
    ///
    /// Returns false, leaving state and revision untouched, if `cancel` fired
    /// before the write lock was acquired.
    pub(crate) async fn complete_fetch(
        &self,
        outcome: Result<Snapshot, FetchError>,
        cancel: &CancellationToken,
    ) -> bool {
        {
            let mut state = self.state.write().await;
            if cancel.is_cancelled() {
                return false;
            }
            state.is_fetch_in_flight = false;
            match outcome {
                Ok(snapshot) => {
                    info!(
                        "Snapshot received: {} rows, {} columns",
                        snapshot.row_count(),
                        snapshot.column_count()
                    );
                    state.apply_snapshot(snapshot);
                }
                Err(error) => {
                    info!("Fetch failed, keeping previous data: {}", error);
                    state.apply_error(error);
                }
            }
        }
        self.bump();
        true
    }

    /// Publish a new revision without changing state
    pub(crate) fn touch(&self) {
        self.bump();
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }
}
