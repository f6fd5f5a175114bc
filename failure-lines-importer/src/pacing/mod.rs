//! Throttling between batch writes.
//!
//! The pause after each batch is the only back-pressure the importer applies
//! to the search index write path.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

/// Decides how long to wait after a batch has been written.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait before the next batch may start.
    async fn pause(&self);
}

/// Fixed-interval throttle.
///
/// A zero delay never sleeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    /// Create a throttle that waits `delay` after every batch.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Create a throttle from whole seconds, as given on the command line.
    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps_configured_duration() {
        let pacer = FixedDelay::from_secs(3);
        let start = Instant::now();

        pacer.pause().await;

        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_does_not_sleep() {
        let pacer = FixedDelay::from_secs(0);
        let start = Instant::now();

        pacer.pause().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
