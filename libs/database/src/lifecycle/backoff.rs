use std::time::Duration;

/// Exponential backoff policy for automatic reconnection attempts.
///
/// The delay before the attempt that follows the `n`-th consecutive failure is
/// `min(base_delay * 2^(n-1), max_delay)`. Once `max_attempts` consecutive
/// failures have been recorded no further automatic attempt is scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Delay after the first failure
    pub base_delay: Duration,

    /// Upper bound for any single delay
    pub max_delay: Duration,

    /// Consecutive failures after which automatic retries stop
    pub max_attempts: u32,
}

impl BackoffPolicy {
    /// Create a policy with the defaults (5s base, 30s cap, 10 attempts)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Delay to wait after `failures` consecutive failed attempts.
    ///
    /// `failures` is clamped to at least 1. The doubling saturates instead of
    /// overflowing, so very large counts simply yield `max_delay`.
    pub fn delay_for(&self, failures: u32) -> Duration {
        let exponent = failures.max(1) - 1;
        let factor = 1u32.checked_shl(exponent).unwrap_or(u32::MAX);

        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Whether another automatic attempt may follow `failures` consecutive failures
    pub fn allows_retry(&self, failures: u32) -> bool {
        failures < self.max_attempts
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(30),
            max_attempts: 10,
        }
    }
}
