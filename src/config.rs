use std::time::Duration;

use crate::errors::HedgedError;

/// Default time allotted to a whole round, in seconds.
pub const DEFAULT_REQUEST_BUDGET_SECS: u64 = 15;

/// Hedging configuration.
///
/// A round is bounded by exactly one deadline, `request_budget`, shared by
/// every attempt in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HedgeConfig {
    /// Total time allotted to a round, from launch to classification.
    ///
    /// When it expires before any attempt succeeds the round is reported as
    /// timed out.
    pub request_budget: Duration,

    /// Optional bound on each individual attempt.
    ///
    /// An attempt that exceeds it fails on its own; the round keeps waiting
    /// for the others. `None` leaves attempts bounded only by the round.
    pub attempt_timeout: Option<Duration>,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            request_budget: Duration::from_secs(DEFAULT_REQUEST_BUDGET_SECS),
            attempt_timeout: None,
        }
    }
}

impl HedgeConfig {
    /// Creates a configuration with a round budget of `secs` seconds.
    ///
    /// A zero budget could never produce a success and is rejected.
    pub fn from_secs(secs: u64) -> Result<Self, HedgedError> {
        Self::default().with_budget(Duration::from_secs(secs))
    }

    /// Replaces the round budget, rejecting a zero duration.
    pub fn with_budget(self, budget: Duration) -> Result<Self, HedgedError> {
        if budget.is_zero() {
            return Err(HedgedError::InvalidBudget);
        }
        Ok(Self {
            request_budget: budget,
            ..self
        })
    }

    /// Bounds every attempt individually, on top of the round budget.
    pub fn with_attempt_timeout(self, timeout: Duration) -> Self {
        Self {
            attempt_timeout: Some(timeout),
            ..self
        }
    }
}
