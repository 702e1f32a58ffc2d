//! Motivation request orchestration
//!
//! Composes the rate limiter, the session call-window slot, and the gate.
//! The window is read, decided on, appended to, and persisted around each
//! admission; consumption happens on admission, independent of the call
//! outcome.

use std::sync::Arc;

use tracing::debug;

use crate::config::{Config, RateLimitConfig};
use crate::core::limiter;
use crate::core::session::{self, SessionStore};
use crate::utils::current_timestamp_millis;
use crate::utils::error::Result;

use super::gate::MotivationGate;
use super::types::{FailureKind, MotivationOutcome};

/// Rate-limited motivation requests for the current session
pub struct MotivationService {
    gate: MotivationGate,
    rate_limit: RateLimitConfig,
    session: Arc<dyn SessionStore>,
}

impl MotivationService {
    /// Create a service from configuration and the session store
    pub fn new(config: &Config, session: Arc<dyn SessionStore>) -> Result<Self> {
        Ok(Self {
            gate: MotivationGate::new(config.ai.clone())?,
            rate_limit: config.rate_limit,
            session,
        })
    }

    /// Request a tip for a task title, counting the attempt against the window
    pub async fn request_for_task(&self, title: &str) -> MotivationOutcome {
        self.request_for_task_at(title, current_timestamp_millis())
            .await
    }

    /// Clock-injected variant of [`request_for_task`](Self::request_for_task)
    pub async fn request_for_task_at(&self, title: &str, now: i64) -> MotivationOutcome {
        let window = session::load_call_window(self.session.as_ref());
        let decision = limiter::admit(&window, now, &self.rate_limit);

        if !decision.allowed {
            debug!(
                "Rate limit reached, retry in {:?} ms",
                decision.retry_after_ms
            );
            return MotivationOutcome::failure(
                FailureKind::RateLimited,
                "Rate limit reached. Please try again later.",
            );
        }

        // The admitted slot is consumed up front; the outcome of the call
        // does not refund it.
        let mut window = decision.window;
        window.push(now);
        session::store_call_window(self.session.as_ref(), &window);

        self.gate.request_motivation(title).await
    }
}
