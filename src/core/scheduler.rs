//! Refresh scheduler
//!
//! Owns the poll cadence of one session. Fetches are triggered on start,
//! by a recurring timer and on demand, and at most one is ever in flight.

use super::state::SessionStore;
use log::{debug, info, trace};
use sheet_pulse_core::SharedSnapshotSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Lifecycle phase of a scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    Idle,
    Polling,
}

/// What a fetch task needs, shared between the scheduler and its timer
struct FetchContext {
    source: SharedSnapshotSource,
    store: Arc<SessionStore>,
    cancel: CancellationToken,
    label: String,
}

impl FetchContext {
    /// Issue a fetch unless one is already outstanding
    async fn try_refresh(self: &Arc<Self>) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        if !self.store.try_begin_fetch().await {
            debug!("[{}] Fetch already in flight, request dropped", self.label);
            return false;
        }

        let ctx = Arc::clone(self);
        tokio::spawn(async move { ctx.run_fetch().await });
        true
    }

    async fn run_fetch(&self) {
        trace!("[{}] Fetching from {}", self.label, self.source.metadata().location);

        let outcome = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!("[{}] Session ended during fetch, result discarded", self.label);
                return;
            }
            outcome = self.source.fetch() => outcome,
        };

        // Re-checked under the write lock; the session may end while we wait for it
        if !self.store.complete_fetch(outcome, &self.cancel).await {
            debug!("[{}] Session ended during fetch, result discarded", self.label);
        }
    }
}

/// Recurring timer task and the token that stops it
struct RecurringTimer {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl RecurringTimer {
    fn spawn(ctx: Arc<FetchContext>, start: Instant, period: Duration) -> Self {
        let token = ctx.cancel.child_token();
        let handle = tokio::spawn(timer_loop(ctx, token.clone(), start, period));
        Self { token, handle }
    }

    fn cancel(self) {
        self.token.cancel();
        self.handle.abort();
    }
}

async fn timer_loop(ctx: Arc<FetchContext>, token: CancellationToken, start: Instant, period: Duration) {
    let mut ticker = tokio::time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                trace!("[{}] Timer tick", ctx.label);
                ctx.try_refresh().await;
            }
        }
    }
    trace!("[{}] Timer loop exited", ctx.label);
}

/// Drives fetches for one session
pub struct RefreshScheduler {
    ctx: Arc<FetchContext>,
    period: Duration,
    auto_refresh: bool,
    phase: SchedulerPhase,
    timer: Option<RecurringTimer>,
}

impl RefreshScheduler {
    pub fn new(
        source: SharedSnapshotSource,
        store: Arc<SessionStore>,
        period: Duration,
        auto_refresh: bool,
        label: impl Into<String>,
    ) -> Self {
        Self {
            ctx: Arc::new(FetchContext {
                source,
                store,
                cancel: CancellationToken::new(),
                label: label.into(),
            }),
            period,
            auto_refresh,
            phase: SchedulerPhase::Idle,
            timer: None,
        }
    }

    /// Enter polling: one immediate fetch, then the timer if auto-refresh is on
    pub async fn start(&mut self) {
        if self.phase == SchedulerPhase::Polling || self.ctx.cancel.is_cancelled() {
            return;
        }
        self.phase = SchedulerPhase::Polling;
        info!(
            "[{}] Polling every {:?} (auto-refresh {})",
            self.ctx.label,
            self.period,
            if self.auto_refresh { "on" } else { "off" }
        );

        let first_tick = Instant::now() + self.period;
        self.ctx.try_refresh().await;
        if self.auto_refresh {
            self.timer = Some(RecurringTimer::spawn(Arc::clone(&self.ctx), first_tick, self.period));
        }
    }

    /// Fetch now, regardless of timer phase. No-op if a fetch is in flight.
    pub async fn request_refresh(&self) -> bool {
        if self.phase != SchedulerPhase::Polling {
            return false;
        }
        self.ctx.try_refresh().await
    }

    /// Turn the recurring timer on or off.
    ///
    /// Turning it on fetches immediately and restarts the cadence from now.
    pub async fn set_auto_refresh(&mut self, enabled: bool) {
        if enabled == self.auto_refresh {
            return;
        }
        self.auto_refresh = enabled;

        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        if enabled && self.phase == SchedulerPhase::Polling && !self.ctx.cancel.is_cancelled() {
            let first_tick = Instant::now() + self.period;
            self.timer = Some(RecurringTimer::spawn(Arc::clone(&self.ctx), first_tick, self.period));
            self.ctx.try_refresh().await;
        }
        info!(
            "[{}] Auto-refresh {}",
            self.ctx.label,
            if enabled { "enabled" } else { "disabled" }
        );
    }

    pub fn is_auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    /// Cancel the timer and any in-flight fetch. Idempotent.
    pub fn shutdown(&mut self) {
        self.ctx.cancel.cancel();
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        if self.phase == SchedulerPhase::Polling {
            debug!("[{}] Scheduler stopped", self.ctx.label);
        }
        self.phase = SchedulerPhase::Idle;
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
