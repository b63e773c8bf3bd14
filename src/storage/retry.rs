//! Backoff schedule for gateway uploads.

use std::time::Duration;

use rand::Rng;

/// How an upload reacts to transient failures.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt.
    None,
    /// Content-addressed uploads are safe to repeat, so this is the default.
    #[default]
    Idempotent,
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// Idempotent schedule with `max_retries` retries; `0` is a single attempt.
    pub fn with_max_retries(max_retries: u32) -> Self {
        match max_retries {
            0 => RetryPolicy::None,
            n => RetryPolicy::Custom(RetryConfig {
                max_retries: n,
                ..RetryConfig::idempotent()
            }),
        }
    }

    /// Resolve to a concrete config, `None` meaning a single attempt.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub initial_delay: Duration,
    /// Upper bound on any single wait, including a server-requested one.
    pub max_delay: Duration,
    pub backoff_factor: f64,
    /// Spread each backoff by up to 25% either way.
    pub jitter: bool,
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::idempotent()
    }
}

impl RetryConfig {
    pub fn idempotent() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Exponential backoff before retry number `attempt` (0-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let max_ms = self.max_delay.as_millis() as f64;
        let exponent = attempt.min(i32::MAX as u32) as i32;
        let mut ms = (self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(exponent))
            .min(max_ms);
        if self.jitter {
            ms *= rand::thread_rng().gen_range(0.75..=1.25);
        }
        Duration::from_millis(ms.max(0.0) as u64)
    }

    /// Single wait before the next attempt.
    ///
    /// A server-supplied `Retry-After` replaces the backoff; either is capped
    /// at `max_delay`.
    pub fn wait_before_retry(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        match retry_after {
            Some(wait) => wait.min(self.max_delay),
            None => self.backoff(attempt),
        }
    }
}

/// Parse a `Retry-After` header given in delay-seconds, as milliseconds.
pub fn parse_retry_after_ms(value: &str) -> Option<u64> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1000))
}
