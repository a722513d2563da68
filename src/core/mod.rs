//! Session lifecycle: state, refresh scheduling and frame rendering

mod scheduler;
mod session;
mod state;
mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use scheduler::{RefreshScheduler, SchedulerPhase};
pub use session::Session;
pub use state::{SessionState, SessionStore};
pub use view::{render_frame, render_view, Frame, View};
