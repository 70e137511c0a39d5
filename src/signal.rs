//! The round's cancellation signal: one cause, committed at most once.

use std::sync::atomic::{AtomicU8, Ordering};

use tokio_util::sync::CancellationToken;

/// Why a round stopped racing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelCause {
    /// Still racing, or ended without either cause (every attempt failed).
    None,
    /// An attempt succeeded first.
    WonBySuccess,
    /// The round budget elapsed first.
    DeadlineExpired,
}

impl CancelCause {
    const NONE: u8 = 0;
    const WON: u8 = 1;
    const EXPIRED: u8 = 2;

    fn to_u8(self) -> u8 {
        match self {
            CancelCause::None => Self::NONE,
            CancelCause::WonBySuccess => Self::WON,
            CancelCause::DeadlineExpired => Self::EXPIRED,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            Self::WON => CancelCause::WonBySuccess,
            Self::EXPIRED => CancelCause::DeadlineExpired,
            _ => CancelCause::None,
        }
    }
}

/// Single-assignment cause cell paired with the token every attempt watches.
///
/// The first successful [`commit`](Self::commit) wins; every later commit
/// is a no-op that reports the cause already in place.
#[derive(Debug, Default)]
pub struct CancelSignal {
    cause: AtomicU8,
    token: CancellationToken,
}

impl CancelSignal {
    /// Creates an uncommitted signal with a fresh token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to record `cause` and, on success, cancels the shared token.
    ///
    /// Returns the cause already committed if another writer got there first.
    /// Committing [`CancelCause::None`] is rejected without touching the cell.
    pub fn commit(&self, cause: CancelCause) -> Result<(), CancelCause> {
        if cause == CancelCause::None {
            return Err(self.cause());
        }

        match self.cause.compare_exchange(
            CancelCause::NONE,
            cause.to_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                self.token.cancel();
                Ok(())
            }
            Err(existing) => Err(CancelCause::from_u8(existing)),
        }
    }

    /// The committed cause, or [`CancelCause::None`] while still racing.
    pub fn cause(&self) -> CancelCause {
        CancelCause::from_u8(self.cause.load(Ordering::Acquire))
    }

    /// Whether any cause has been committed and the token cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A child handle attempts can await without owning the signal.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}
