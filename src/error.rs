use std::io;
use thiserror::Error;

/// Tracker-level failures.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The editor application cannot be reached. The tracker stays detached;
    /// callers retry later.
    #[error("editor host unavailable")]
    HostUnavailable,
}

/// Failures raised by the outbound invocation bridge.
///
/// These never propagate out of the tracker: a failed callback invocation is
/// logged with its full context and tracking continues.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("bridge i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("bridge serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("frame too large: {len} bytes (max: {max} bytes)")]
    FrameTooLarge { len: usize, max: usize },

    #[error("bridge writer lock poisoned")]
    LockPoisoned,
}
