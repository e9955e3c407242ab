use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Keeps a minimum interval between consecutive outbound requests
pub struct RateLimiter {
    interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            last_request: None,
        }
    }

    /// Sleep until the interval since the previous request has elapsed
    pub async fn wait(&mut self) {
        if let Some(ready_at) = self.next_slot() {
            sleep_until(ready_at).await;
        }
        self.last_request = Some(Instant::now());
    }

    fn next_slot(&self) -> Option<Instant> {
        let ready_at = self.last_request? + self.interval;
        (ready_at > Instant::now()).then_some(ready_at)
    }
}
