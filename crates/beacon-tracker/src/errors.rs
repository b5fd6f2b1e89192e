//! Tracker error types.
//!
//! Lifecycle misuse is never an error; out-of-order calls are dropped.
//! Only wiring the process-wide instance can fail.

use thiserror::Error;

/// Errors raised while wiring the tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A tracker was already installed for this process.
    #[error("an event tracker is already installed for this process")]
    AlreadyInstalled,
}

/// Result type for tracker wiring.
pub type Result<T> = std::result::Result<T, TrackerError>;
