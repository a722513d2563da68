//! sheet-pulse: live charts and text clouds from a polled response sheet
//!
//! This library wires the workspace crates into a running session:
//! - Refresh scheduling with a single-flight fetch guard
//! - Session state and per-render frame computation
//! - Persisted application configuration

pub mod config;
pub mod core;

// Re-export commonly used types
pub use config::AppConfig;
pub use self::core::{Frame, Session, SessionState, View};
pub use sheet_pulse_types::{ChartKind, DisplayConfig, DisplayModeOverride};
