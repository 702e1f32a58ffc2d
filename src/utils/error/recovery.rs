//! Retry-once recovery policy
//!
//! A bounded variant of retry-with-backoff: exactly one retry, entered only
//! when an eligibility predicate approves the first failure.

use std::time::Duration;
use tracing::debug;

/// Failure of a `RetryOnce::call` invocation
#[derive(Debug)]
pub enum RetryError<E> {
    /// The first attempt failed and was not eligible for retry
    Terminal(E),
    /// The retry was attempted and also failed
    Exhausted(E),
}

impl<E> RetryError<E> {
    /// The underlying error, regardless of which attempt produced it
    pub fn into_inner(self) -> E {
        match self {
            Self::Terminal(error) | Self::Exhausted(error) => error,
        }
    }
}

/// Single-retry policy with a fixed backoff delay
#[derive(Debug, Clone)]
pub struct RetryOnce {
    backoff: Duration,
}

impl RetryOnce {
    /// Create a new policy
    pub fn new(backoff: Duration) -> Self {
        Self { backoff }
    }

    /// Execute `f`, retrying exactly once when `eligible` approves the first failure
    ///
    /// Issues at most two attempts. The second failure is always
    /// `RetryError::Exhausted`, whatever its classification.
    pub async fn call<F, Fut, T, E>(
        &self,
        mut f: F,
        eligible: impl Fn(&E) -> bool,
    ) -> std::result::Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<T, E>>,
        E: std::fmt::Display,
    {
        match f().await {
            Ok(value) => Ok(value),
            Err(error) if eligible(&error) => {
                debug!(
                    "Attempt 1 failed: {}, retrying in {:?}",
                    error, self.backoff
                );
                tokio::time::sleep(self.backoff).await;
                f().await.map_err(RetryError::Exhausted)
            }
            Err(error) => Err(RetryError::Terminal(error)),
        }
    }
}
