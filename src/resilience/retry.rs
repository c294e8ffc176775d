//! Bounded fixed-interval polling.

use std::time::Duration;
use tokio::time::sleep;

/// Attempt budget and spacing for a bounded poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Maximum number of predicate checks before giving up.
    pub max_attempts: u32,

    /// Fixed delay between consecutive checks.
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_millis(3000),
        }
    }
}

/// What a bounded poll observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    /// Whether the predicate held before the attempt budget ran out.
    pub satisfied: bool,

    /// Number of checks actually performed.
    pub attempts: u32,
}

/// Evaluate `predicate` until it returns true or the attempt budget is
/// exhausted.
///
/// The first check runs immediately, and the interval is only slept
/// between checks, never after the last one. A predicate that holds on
/// the first check therefore completes without any delay at all.
pub async fn poll_until<F>(policy: &PollPolicy, mut predicate: F) -> PollOutcome
where
    F: FnMut() -> bool,
{
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        if predicate() {
            return PollOutcome {
                satisfied: true,
                attempts: attempt,
            };
        }
        if attempt < max_attempts {
            sleep(policy.interval).await;
        }
    }

    PollOutcome {
        satisfied: false,
        attempts: max_attempts,
    }
}
