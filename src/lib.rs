//! A hedged-request dispatcher.
//!
//! Issues the same idempotent request to every candidate endpoint at once,
//! keeps the first successful response, cancels the rest, and bounds the
//! whole exchange with a single deadline. A round is as slow as its fastest
//! healthy endpoint, and a failing endpoint is never retried.
//!
//! # Quick Start
//!
//! ```no_run
//! use hedged_curl::{HedgeConfig, HedgedClient, Target};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HedgedClient::http(HedgeConfig::from_secs(5)?);
//!
//! let winner = client
//!     .try_dispatch([
//!         Target::new("https://eu.example.com/health"),
//!         Target::new("https://us.example.com/health"),
//!     ])
//!     .await?;
//! println!("{} answered with {}", winner.target, winner.response.status);
//! # Ok(())
//! # }
//! ```
//!
//! # Round Semantics
//!
//! 1. One attempt per target is spawned, all sharing one cancellation token
//! 2. The first success commits `WonBySuccess` and cancels the others
//! 3. If the budget elapses first, `DeadlineExpired` is committed instead
//! 4. The round waits for every attempt to finish before classifying
//!
//! The outcome is exactly one of [`Outcome::Success`], [`Outcome::TimedOut`]
//! or [`Outcome::AllFailed`]. Individual attempt failures never surface.
//!
//! # Custom Transports
//!
//! Anything implementing [`Transport`] can be raced; [`HttpTransport`] is the
//! `reqwest`-backed default.

pub mod attempt;
pub mod client;
pub mod config;
pub mod errors;
pub mod outcome;
mod round;
pub mod signal;
pub mod target;
pub mod transport;

pub use attempt::Validator;
pub use client::HedgedClient;
pub use config::{HedgeConfig, DEFAULT_REQUEST_BUDGET_SECS};
pub use errors::{AttemptError, HedgedError, TransportError};
pub use outcome::{classify, Outcome, Winner};
pub use signal::{CancelCause, CancelSignal};
pub use target::Target;
pub use transport::{HttpResponse, HttpTransport, Transport};
