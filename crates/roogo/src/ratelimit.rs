use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::policy::RateLimitPolicy;

/// Raised when a key has used up its window.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rate limit exceeded; retry in {}s", .retry_after.as_secs().max(1))]
pub struct RateLimited {
    pub retry_after: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug, Default)]
struct Windows {
    by_key: HashMap<String, Window>,
    last_sweep: Option<Instant>,
}

impl Windows {
    /// Drop expired windows, at most once per `window`.
    fn sweep(&mut self, now: Instant, window: Duration) {
        let due = self
            .last_sweep
            .map_or(true, |at| now.saturating_duration_since(at) >= window);
        if due {
            self.by_key
                .retain(|_, entry| now.saturating_duration_since(entry.started) < window);
            self.last_sweep = Some(now);
        }
    }
}

/// Per-key fixed-window request counter.
///
/// Keys whose window has elapsed are forgotten, so memory tracks the keys seen in
/// roughly the last two windows.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    policy: RateLimitPolicy,
    windows: Mutex<Windows>,
}

impl FixedWindowLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            windows: Mutex::new(Windows::default()),
        }
    }

    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Keys currently holding a window.
    pub fn tracked_keys(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .by_key
            .len()
    }

    pub fn check(&self, key: &str) -> Result<(), RateLimited> {
        self.check_at(key, Instant::now())
    }

    /// Count a request for `key` at `now`.
    pub fn check_at(&self, key: &str, now: Instant) -> Result<(), RateLimited> {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        windows.sweep(now, self.policy.window);
        let window = windows.by_key.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(window.started);
        if elapsed >= self.policy.window {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.policy.max_requests {
            return Err(RateLimited {
                retry_after: self.policy.window.saturating_sub(elapsed),
            });
        }

        window.count += 1;
        Ok(())
    }
}
