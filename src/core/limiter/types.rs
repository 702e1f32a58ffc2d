//! Rate limiting types and data structures

use serde::{Deserialize, Serialize};

/// Ordered window of admitted call timestamps, milliseconds since the epoch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallWindow(pub Vec<i64>);

impl CallWindow {
    /// Empty window
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of recorded timestamps
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the window holds no timestamps
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record a timestamp
    pub fn push(&mut self, timestamp: i64) {
        self.0.push(timestamp);
    }

    /// Timestamps in recorded order
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }
}

impl From<Vec<i64>> for CallWindow {
    fn from(timestamps: Vec<i64>) -> Self {
        Self(timestamps)
    }
}

/// Admission decision over a pruned window
#[derive(Debug, Clone)]
pub struct Admission {
    /// Whether the call may proceed
    pub allowed: bool,
    /// Window after pruning; on admission the caller appends `now` to this
    /// window and persists it
    pub window: CallWindow,
    /// Remaining slots in the current window, before the append
    pub remaining: u32,
    /// Milliseconds until the oldest entry leaves the window, set on rejection
    pub retry_after_ms: Option<i64>,
}
