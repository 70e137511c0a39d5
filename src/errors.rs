use std::time::Duration;

/// Errors a [`Transport`](crate::transport::Transport) can report for one request.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// The HTTP client failed (connect, TLS, protocol, body read).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The target could not be turned into a request.
    #[error("invalid target {0:?}")]
    InvalidTarget(String),

    /// Any other transport-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Why a single attempt ended without a usable response.
///
/// Attempt failures are recovered inside the round and never surface
/// individually to the caller.
#[derive(thiserror::Error, Debug)]
pub enum AttemptError {
    /// The transport errored.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response arrived but the validity predicate refused it.
    #[error("response rejected: {0}")]
    Rejected(String),

    /// The round was cancelled (won elsewhere or deadline) before a response arrived.
    #[error("cancelled before completion")]
    Cancelled,

    /// The optional per-attempt bound elapsed.
    #[error("attempt timed out after {0:?}")]
    AttemptTimeout(Duration),
}

/// Errors that can occur during a hedged dispatch.
#[derive(thiserror::Error, Debug)]
pub enum HedgedError {
    /// The round budget must be a positive duration.
    #[error("request budget must be positive")]
    InvalidBudget,

    /// Every attempt failed before the deadline (or there were no targets).
    #[error("all {attempts} attempts failed")]
    AllFailed {
        /// Number of attempts launched in the round.
        attempts: usize,
    },

    /// No attempt succeeded within the round budget.
    #[error("hedged request timed out after {0:?}")]
    Timeout(Duration),
}
