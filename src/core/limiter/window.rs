//! Sliding window admission
//!
//! Pure functions over a `CallWindow` value. No clock access and no
//! persistence side effects; the caller supplies `now` and owns the storage.

use crate::config::RateLimitConfig;

use super::types::{Admission, CallWindow};

/// Drop timestamps that have left the window
///
/// Strict prune: an entry exactly `window_ms` old is removed. Entries are
/// never reordered, so out-of-order timestamps from the caller are tolerated.
pub fn prune(window: &CallWindow, now: i64, window_ms: i64) -> CallWindow {
    CallWindow(
        window
            .as_slice()
            .iter()
            .copied()
            .filter(|&t| now - t < window_ms)
            .collect(),
    )
}

/// Decide admission for a call at `now`
///
/// Rejection does not consume a slot: the returned window is pruned but not
/// appended to. On admission the caller appends `now` and persists the
/// window.
pub fn admit(window: &CallWindow, now: i64, config: &RateLimitConfig) -> Admission {
    let pruned = prune(window, now, config.window_ms);
    let count = pruned.len() as u32;

    if count >= config.max_calls {
        let retry_after_ms = pruned
            .as_slice()
            .first()
            .map(|&first| config.window_ms - (now - first));
        return Admission {
            allowed: false,
            window: pruned,
            remaining: 0,
            retry_after_ms,
        };
    }

    Admission {
        allowed: true,
        remaining: config.max_calls.saturating_sub(count),
        window: pruned,
        retry_after_ms: None,
    }
}
