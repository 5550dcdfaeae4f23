use std::time::Duration;

use resplink_codec::CodecConfig;
use resplink_transport::DEFAULT_READ_TIMEOUT;

/// Wait after opening a link before the first command, so the device can
/// finish its own start-up (many boards reset when the port opens).
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Decode attempts per command before giving up.
pub const DEFAULT_MAX_READ_ATTEMPTS: u32 = 50;

/// Backoff growth per failed attempt.
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_millis(5);

/// Upper bound on any single backoff sleep.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_millis(250);

/// How incomplete replies are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Decode attempts per command, including the first. Default: 50.
    pub max_read_attempts: u32,
    /// Sleep after failed attempt `i` (0-based) is `i * backoff_unit`. Default: 5 ms.
    pub backoff_unit: Duration,
    /// Cap on a single sleep. Default: 250 ms.
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Sleep before the attempt following failed attempt `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_unit
            .saturating_mul(attempt)
            .min(self.max_backoff)
    }

    /// Upper bound on total sleeping for one command.
    pub fn worst_case_backoff(&self) -> Duration {
        (0..self.max_read_attempts.saturating_sub(1))
            .map(|attempt| self.delay_for(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_read_attempts: DEFAULT_MAX_READ_ATTEMPTS,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }
}

/// Configuration for a [`crate::Client`], fixed at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Upper bound on one blocking read. Default: 5 s.
    pub read_timeout: Duration,
    /// Pause after opening the link. Default: 3 s.
    pub settle_delay: Duration,
    /// Retry policy for incomplete replies.
    pub retry: RetryPolicy,
    /// Reply decoding limits.
    pub codec: CodecConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            read_timeout: DEFAULT_READ_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
            retry: RetryPolicy::default(),
            codec: CodecConfig::default(),
        }
    }
}
