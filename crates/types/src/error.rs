//! Error taxonomy shared across crates

use thiserror::Error;

/// Why a snapshot could not be obtained.
///
/// Fetch errors never escape the scheduler; they are stored as the session's
/// last error while the previous snapshot stays on display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success HTTP status
    #[error("endpoint unreachable (HTTP {status}); check the deployment URL")]
    Unreachable { status: u16 },

    /// Connection, timeout or body read failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The body was not a `{ headers, rows }` document
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The endpoint reported its own failure (`{ error: true, message }`)
    #[error("{0}")]
    Upstream(String),
}

/// Invalid session configuration or selection.
///
/// Raised synchronously; the transition that caused it does not happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("endpoint URL must not be empty")]
    EmptyUrl,

    #[error("refresh interval {value}s is outside {min}..={max} seconds")]
    IntervalOutOfRange { value: u64, min: u64, max: u64 },

    #[error("column {index} is out of range ({available} columns available)")]
    ColumnOutOfRange { index: usize, available: usize },
}
