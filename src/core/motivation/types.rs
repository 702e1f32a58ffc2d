//! Motivation outcome types

use serde::{Deserialize, Serialize};

/// Failure classification for a motivation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Rejected client-side, never reached the network
    RateLimited,
    /// No API credential available
    NotConfigured,
    /// Empty subject text
    InvalidInput,
    /// HTTP 429 from the AI endpoint, terminal
    QuotaExceeded,
    /// Server or network failure that survived the retry
    TransientError,
    /// Anything else, including an empty success body
    UnknownError,
}

/// Outcome of a motivation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotivationOutcome {
    /// Non-empty generated message
    Success {
        /// Generated tip text
        message: String,
    },
    /// Recovered failure
    Failure {
        /// Classification
        kind: FailureKind,
        /// User-presentable detail
        detail: String,
    },
}

impl MotivationOutcome {
    /// Successful outcome
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }

    /// Failed outcome
    pub fn failure(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            detail: detail.into(),
        }
    }

    /// Whether the request produced a message
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Failure classification, if any
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}
