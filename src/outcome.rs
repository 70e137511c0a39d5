use std::time::Duration;

use crate::{errors::HedgedError, signal::CancelCause, target::Target};

/// Process exit status for a successful round.
pub const EXIT_SUCCESS: u8 = 0;
/// Process exit status when the round budget elapsed (HTTP 408 truncated to a byte).
pub const EXIT_TIMED_OUT: u8 = (408 % 256) as u8;
/// Process exit status when every attempt failed (HTTP 400 truncated to a byte).
pub const EXIT_ALL_FAILED: u8 = (400 % 256) as u8;

/// The attempt whose success was honored for a round.
#[derive(Debug, Clone)]
pub struct Winner<R> {
    pub target: Target,
    pub response: R,
}

/// Terminal classification of one round.
#[derive(Debug, Clone)]
pub enum Outcome<R> {
    Success(Winner<R>),
    /// The round budget elapsed before any attempt succeeded.
    TimedOut { budget: Duration },
    /// Every attempt failed before the deadline, or there were none.
    AllFailed { attempts: usize },
}

/// Maps a drained round's state to its outcome.
///
/// A recorded winner always wins, whatever the cause says: the success
/// committed its cause first. Without one, only an expired deadline reads as
/// a timeout; anything else means every attempt failed.
pub fn classify<R>(
    winner: Option<Winner<R>>,
    cause: CancelCause,
    attempts: usize,
    budget: Duration,
) -> Outcome<R> {
    match (winner, cause) {
        (Some(winner), _) => Outcome::Success(winner),
        (None, CancelCause::DeadlineExpired) => Outcome::TimedOut { budget },
        (None, _) => Outcome::AllFailed { attempts },
    }
}

impl<R> Outcome<R> {
    /// Whether an attempt's response was honored.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Short stable label, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::TimedOut { .. } => "timed_out",
            Outcome::AllFailed { .. } => "all_failed",
        }
    }

    /// Exit status the command-line front end reports for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Success(_) => EXIT_SUCCESS,
            Outcome::TimedOut { .. } => EXIT_TIMED_OUT,
            Outcome::AllFailed { .. } => EXIT_ALL_FAILED,
        }
    }

    /// The honored attempt, if the round succeeded.
    pub fn winner(&self) -> Option<&Winner<R>> {
        match self {
            Outcome::Success(winner) => Some(winner),
            _ => None,
        }
    }

    /// Converts timeouts and total failure into [`HedgedError`].
    pub fn into_result(self) -> Result<Winner<R>, HedgedError> {
        match self {
            Outcome::Success(winner) => Ok(winner),
            Outcome::TimedOut { budget } => Err(HedgedError::Timeout(budget)),
            Outcome::AllFailed { attempts } => Err(HedgedError::AllFailed { attempts }),
        }
    }
}
