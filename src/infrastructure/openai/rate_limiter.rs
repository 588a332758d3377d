//! Client-side throttling for the OpenAI endpoints.
//!
//! A token bucket whose burst size equals its per-second rate. A rate that
//! is not a positive finite number turns throttling off.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

/// Shortest wait between refill checks.
const MIN_WAIT: Duration = Duration::from_millis(5);

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    refilled_at: Instant,
}

impl Bucket {
    fn refill(&mut self, now: Instant, per_second: f64) {
        let elapsed = now.saturating_duration_since(self.refilled_at).as_secs_f64();
        self.tokens = elapsed.mul_add(per_second, self.tokens).min(per_second);
        self.refilled_at = now;
    }

    /// Take one token, or report how long until one is available.
    fn take(&mut self, now: Instant, per_second: f64) -> Result<(), Duration> {
        self.refill(now, per_second);
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            return Ok(());
        }
        Err(Duration::from_secs_f64((1.0 - self.tokens) / per_second).max(MIN_WAIT))
    }
}

/// Cloneable handle; clones share one bucket.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    bucket: Option<Arc<Mutex<Bucket>>>,
    per_second: f64,
}

impl RateLimiter {
    pub fn new(per_second: f64) -> Self {
        let bucket = (per_second.is_finite() && per_second > 0.0).then(|| {
            Arc::new(Mutex::new(Bucket {
                tokens: per_second,
                refilled_at: Instant::now(),
            }))
        });
        Self { bucket, per_second }
    }

    pub fn is_unlimited(&self) -> bool {
        self.bucket.is_none()
    }

    /// Wait until a request may be sent.
    pub async fn acquire(&self) {
        let Some(bucket) = &self.bucket else {
            return;
        };
        loop {
            let wait = match bucket.lock().await.take(Instant::now(), self.per_second) {
                Ok(()) => return,
                Err(wait) => wait,
            };
            debug!(wait_ms = wait.as_millis(), "rate limited");
            sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refill_is_capped_at_rate() {
        let start = Instant::now();
        let mut bucket = Bucket {
            tokens: 0.0,
            refilled_at: start,
        };
        bucket.refill(start + Duration::from_secs(10), 3.0);
        assert!((bucket.tokens - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_take_reports_wait_when_empty() {
        let start = Instant::now();
        let mut bucket = Bucket {
            tokens: 0.5,
            refilled_at: start,
        };
        let wait = bucket.take(start, 2.0).unwrap_err();
        assert_eq!(wait, Duration::from_millis(250));

        bucket.tokens = 1.0;
        assert!(bucket.take(start, 2.0).is_ok());
        assert!(bucket.tokens.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_initial_burst_is_immediate() {
        let limiter = RateLimiter::new(5.0);
        let start = Instant::now();
        for _ in 0..5 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_waits_once_burst_is_spent() {
        let limiter = RateLimiter::new(2.0);
        limiter.acquire().await;
        limiter.acquire().await;

        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_non_positive_rate_disables_throttling() {
        for rate in [0.0, -1.0, f64::NAN] {
            let limiter = RateLimiter::new(rate);
            assert!(limiter.is_unlimited());
            limiter.acquire().await;
        }
    }
}
