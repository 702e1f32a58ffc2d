//! Utility modules for the task client
//!
//! ## Module Organization
//!
//! - **error**: Error handling, recovery, and the crate-wide `Result` alias

pub mod error;

// Re-export commonly used types
pub use error::{AppError, Result};

use std::time::{SystemTime, UNIX_EPOCH};

/// Get current timestamp in milliseconds since the Unix epoch
pub fn current_timestamp_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
