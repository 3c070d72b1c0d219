//! Fixed-window rate limiter keyed by caller identity.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::errors::DomainError;

/// Bucket shared by every caller whose identity is unknown
pub const UNKNOWN_CALLER: &str = "unknown";

/// Requests seen in the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitCounter {
    pub count: u32,
    pub window_start: DateTime<Utc>,
}

pub struct RateLimiter {
    counters: Mutex<HashMap<String, RateLimitCounter>>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
            window,
            max_requests,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Count one request for `caller` and reject it once the window is full.
    ///
    /// Rejected requests are counted too, so hammering does not shorten
    /// the wait.
    pub async fn check(&self, caller: &str, now: DateTime<Utc>) -> Result<(), DomainError> {
        let mut counters = self.counters.lock().await;
        let counter = counters
            .entry(caller.to_string())
            .or_insert(RateLimitCounter {
                count: 0,
                window_start: now,
            });

        let elapsed = (now - counter.window_start).to_std().unwrap_or_default();
        if elapsed > self.window {
            counter.count = 1;
            counter.window_start = now;
        } else {
            counter.count = counter.count.saturating_add(1);
        }

        if counter.count > self.max_requests {
            let retry_after = self.window.saturating_sub(elapsed);
            tracing::warn!(
                caller = %caller,
                count = counter.count,
                "Rate limit exceeded"
            );
            return Err(DomainError::RateLimited { retry_after });
        }

        Ok(())
    }

    /// Snapshot of a caller's counter
    pub async fn counter(&self, caller: &str) -> Option<RateLimitCounter> {
        self.counters.lock().await.get(caller).copied()
    }
}
