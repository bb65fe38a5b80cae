use crate::config::RetryConfig;
use std::time::Duration;

/// High-level classification of an authorization API error for retry
/// purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The assignment already exists; the desired end-state holds.
    AlreadyExists,
    /// The principal is not visible to the authorization service yet
    /// (identity replication in progress). The only retryable kind.
    PrincipalNotFound,
    /// Authorization denied. Retrying cannot change the decision.
    Forbidden,
    /// Any other error. Failed fast rather than retried, so configuration
    /// and network problems are not masked behind backoff.
    Other,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// The desired end-state already holds; report success.
    Satisfied,
    /// Stop and report the error.
    Fail,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff policy for the assignment loop.
///
/// The schedule is a pure function of the attempt index: 5s, 10s, 20s, 40s
/// before attempts 2..=5 with the defaults. No jitter and no delay cap; the
/// attempt ceiling bounds the schedule.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of create calls (including the first).
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each attempt after.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(cfg: &RetryConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts,
            base_delay: Duration::from_secs_f64(cfg.base_delay_secs),
        }
    }

    /// Delay to wait before attempt `attempt` (2-based; attempt 1 never
    /// waits).
    pub fn delay_before(&self, attempt: u32) -> Duration {
        debug_assert!(attempt >= 2);
        let exp = 1u32 << attempt.saturating_sub(2).min(16);
        self.base_delay.saturating_mul(exp)
    }

    /// Decide what to do after attempt `attempt` (1-based) failed with
    /// `kind`.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        match kind {
            ErrorKind::AlreadyExists => RetryDecision::Satisfied,
            ErrorKind::Forbidden | ErrorKind::Other => RetryDecision::Fail,
            ErrorKind::PrincipalNotFound => {
                if attempt >= self.max_attempts {
                    RetryDecision::Fail
                } else {
                    RetryDecision::RetryAfter(self.delay_before(attempt + 1))
                }
            }
        }
    }
}
