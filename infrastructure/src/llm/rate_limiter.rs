//! Minimum-spacing rate limiter for outbound model calls.
//!
//! One instance is shared by every model call in the process. The lock is
//! held across the sleep, so "check the interval, then stamp the start
//! time" is a single critical section and concurrent callers are spaced
//! one interval apart in the order they acquire the lock.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

pub struct RateLimiter {
    interval: Duration,
    last_start: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Allow at most `requests_per_minute` call starts per minute.
    /// Zero disables limiting.
    pub fn per_minute(requests_per_minute: u32) -> Self {
        let interval = if requests_per_minute == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(60.0 / f64::from(requests_per_minute))
        };
        Self::with_interval(interval)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            last_start: Mutex::new(None),
        }
    }

    pub fn unlimited() -> Self {
        Self::with_interval(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Suspend until at least one interval has passed since the previous
    /// call start, then record now as the new call start.
    pub async fn wait(&self) {
        let mut last_start = self.last_start.lock().await;

        if let Some(previous) = *last_start {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                let remaining = self.interval - elapsed;
                debug!(wait_ms = remaining.as_millis() as u64, "Rate limit: waiting");
                tokio::time::sleep(remaining).await;
            }
        }

        *last_start = Some(Instant::now());
    }
}
