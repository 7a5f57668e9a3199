// Read Mode - non-blocking pop vs. bounded blocking pop

use std::time::Duration;

/// How a read waits for a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Pop immediately; absent when the queue is empty
    #[default]
    NonBlocking,
    /// Wait for a value; `None` waits indefinitely
    Blocking(Option<Duration>),
}

impl ReadMode {
    pub fn blocking(timeout: Duration) -> Self {
        ReadMode::Blocking(Some(timeout))
    }

    pub fn blocking_forever() -> Self {
        ReadMode::Blocking(None)
    }

    /// Build a mode from the (block, timeout) pair used by callers that
    /// express waits in fractional seconds
    pub fn from_flags(block: bool, timeout_secs: Option<f64>) -> Self {
        if !block {
            return ReadMode::NonBlocking;
        }
        match timeout_secs {
            // Waits too long for a Duration are clamped
            Some(secs) if secs.is_finite() && secs > 0.0 => ReadMode::Blocking(Some(
                Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX),
            )),
            Some(_) => ReadMode::Blocking(Some(Duration::ZERO)),
            None => ReadMode::Blocking(None),
        }
    }
}

/// Convert a wait bound to the whole seconds the store expects
///
/// Rounds up so a read never gives up before the caller's minimum wait
/// (0.1s -> 1s). A zero wait is raised to 1s since 0 means "forever" to the
/// store. `None` maps to 0.
pub fn wait_secs(timeout: Option<Duration>) -> u64 {
    match timeout {
        None => 0,
        Some(t) => {
            let whole = t.as_secs();
            let secs = if t.subsec_nanos() > 0 { whole.saturating_add(1) } else { whole };
            secs.max(1)
        }
    }
}
