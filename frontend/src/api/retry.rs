use std::{future::Future, time::Duration};

use futures::future::{self, Either};
use reqwest::Method;

use super::{errors::ErrorClass, types::ApiError};
use crate::config::RetryConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub const fn disabled() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
        }
    }

    /// Delay before retry number `attempt` (1-based), growing linearly.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    pub fn should_retry(&self, method: &Method, error: &ApiError, attempt: u32) -> bool {
        attempt <= self.max_retries
            && is_idempotent(method)
            && matches!(error.class(), ErrorClass::Timeout | ErrorClass::Server)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

pub fn is_idempotent(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::PUT | Method::DELETE | Method::OPTIONS
    )
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Races `fut` against a timer; `None` when the timer fires first.
pub async fn with_timeout<F, T>(fut: F, limit: Duration) -> Option<T>
where
    F: Future<Output = T>,
{
    let fut = std::pin::pin!(fut);
    let timer = std::pin::pin!(sleep(limit));
    match future::select(fut, timer).await {
        Either::Left((value, _)) => Some(value),
        Either::Right(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(1000),
        }
    }

    #[test]
    fn delay_grows_linearly() {
        let policy = policy();
        assert_eq!(policy.delay_for(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2000));
    }

    #[test]
    fn retries_idempotent_requests_on_timeout_or_server_error() {
        let policy = policy();
        assert!(policy.should_retry(&Method::GET, &ApiError::timeout(), 1));
        assert!(policy.should_retry(&Method::DELETE, &ApiError::from_status(503, b""), 2));
        assert!(!policy.should_retry(&Method::GET, &ApiError::from_status(503, b""), 3));
    }

    #[test]
    fn never_retries_posts_or_client_errors() {
        let policy = policy();
        assert!(!policy.should_retry(&Method::POST, &ApiError::timeout(), 1));
        assert!(!policy.should_retry(&Method::PATCH, &ApiError::from_status(500, b""), 1));
        assert!(!policy.should_retry(&Method::GET, &ApiError::from_status(404, b""), 1));
        assert!(!policy.should_retry(&Method::GET, &ApiError::network(), 1));
    }

    #[test]
    fn disabled_policy_never_retries() {
        let policy = RetryPolicy::from_config(&RetryConfig::default());
        assert!(!policy.should_retry(&Method::GET, &ApiError::timeout(), 1));
    }
}
