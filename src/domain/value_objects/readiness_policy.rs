//! Readiness polling policy

use std::time::Duration;

/// Fixed-interval, bounded polling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl ReadinessPolicy {
    pub const DEFAULT_INTERVAL_SECS: u64 = 20;
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Longest possible wait: no sleep follows the final attempt
    pub fn ceiling(&self) -> Duration {
        self.interval * self.max_attempts.saturating_sub(1)
    }
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(Self::DEFAULT_INTERVAL_SECS),
            Self::DEFAULT_MAX_ATTEMPTS,
        )
    }
}
