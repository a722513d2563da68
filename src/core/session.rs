//! A running display session
//!
//! A session is created from a validated [`DisplayConfig`] and a source, owns
//! its own state and scheduler, and is torn down by [`Session::end`] or drop.

use super::scheduler::{RefreshScheduler, SchedulerPhase};
use super::state::{SessionState, SessionStore};
use super::view::{render_frame, Frame};
use log::info;
use sheet_pulse_core::SharedSnapshotSource;
use sheet_pulse_types::{ChartKind, ConfigError, DisplayConfig, DisplayModeOverride};
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

pub struct Session {
    id: Uuid,
    store: Arc<SessionStore>,
    scheduler: RefreshScheduler,
}

impl Session {
    /// Validate the configuration and begin polling.
    ///
    /// A rejected configuration creates no state and issues no fetch.
    pub async fn start(config: DisplayConfig, source: SharedSnapshotSource) -> Result<Self, ConfigError> {
        config.validate()?;

        let id = Uuid::new_v4();
        let label = id.to_string()[..8].to_string();
        info!(
            "[{}] Session started for {} ({})",
            label,
            config.endpoint_url,
            source.metadata().id
        );

        let store = SessionStore::new(SessionState::new(config.chart_kind_default));
        let mut scheduler = RefreshScheduler::new(
            source,
            Arc::clone(&store),
            config.refresh_interval(),
            config.auto_refresh_enabled,
            label,
        );
        scheduler.start().await;

        Ok(Self {
            id,
            store,
            scheduler,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Receiver that changes after every state mutation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }

    /// Manual refresh. Returns false when dropped because a fetch is in flight.
    pub async fn refresh(&self) -> bool {
        self.scheduler.request_refresh().await
    }

    /// Toggle the recurring timer. Turning it on also fetches immediately.
    pub async fn set_auto_refresh(&mut self, enabled: bool) {
        self.scheduler.set_auto_refresh(enabled).await;
        // Redraw the toggle even though no session field changed
        self.store.touch();
    }

    pub fn is_auto_refresh(&self) -> bool {
        self.scheduler.is_auto_refresh()
    }

    pub fn is_active(&self) -> bool {
        self.scheduler.phase() == SchedulerPhase::Polling
    }

    pub async fn select_column(&self, index: usize) -> Result<(), ConfigError> {
        self.store.update(|state| state.select_column(index)).await
    }

    pub async fn set_display_mode(&self, mode: DisplayModeOverride) {
        self.store.update(|state| state.display_mode = mode).await;
    }

    pub async fn set_chart_kind(&self, kind: ChartKind) {
        self.store.update(|state| state.chart_kind = kind).await;
    }

    /// Copy of the current state
    pub async fn state(&self) -> SessionState {
        self.store.snapshot().await
    }

    /// Render the current state
    pub async fn frame(&self) -> Frame {
        let state = self.store.read().await;
        render_frame(&state, self.scheduler.is_auto_refresh())
    }

    /// Stop polling and discard any in-flight result
    pub fn end(mut self) {
        self.scheduler.shutdown();
        info!("[{}] Session ended", &self.id.to_string()[..8]);
    }
}
