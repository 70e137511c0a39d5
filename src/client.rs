use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use crate::{
    attempt::{Attempt, Validator},
    config::HedgeConfig,
    errors::HedgedError,
    outcome::{Outcome, Winner},
    round,
    target::Target,
    transport::{HttpResponse, HttpTransport, Transport},
};

/// A client that hedges one idempotent request across many targets.
///
/// Each call to [`dispatch`](Self::dispatch) is one round: the same request
/// goes to every target at once, the first success is kept, the rest are
/// cancelled, and the whole round is bounded by a single deadline.
pub struct HedgedClient<T: Transport = HttpTransport> {
    transport: Arc<T>,
    cfg: HedgeConfig,
    validator: Option<Validator<T::Response>>,
    active: Arc<AtomicUsize>,
}

impl<T: Transport> Clone for HedgedClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            cfg: self.cfg,
            validator: self.validator.clone(),
            active: self.active.clone(),
        }
    }
}

impl HedgedClient<HttpTransport> {
    /// Creates a client that races plain HTTP `GET`s.
    ///
    /// # Example
    /// ```no_run
    /// use hedged_curl::{HedgeConfig, HedgedClient, Outcome, Target};
    ///
    /// # async fn example() {
    /// let client = HedgedClient::http(HedgeConfig::default());
    /// let targets = vec![
    ///     Target::new("https://mirror-a.example.com/index.html"),
    ///     Target::new("https://mirror-b.example.com/index.html"),
    /// ];
    ///
    /// match client.dispatch_default(targets).await {
    ///     Outcome::Success(winner) => println!("{} answered {}", winner.target, winner.response.status),
    ///     Outcome::TimedOut { budget } => eprintln!("nothing within {budget:?}"),
    ///     Outcome::AllFailed { attempts } => eprintln!("all {attempts} attempts failed"),
    /// }
    /// # }
    /// ```
    pub fn http(cfg: HedgeConfig) -> Self {
        Self::new(HttpTransport::new(), cfg)
    }

    /// Only accepts responses with a 2xx status; anything else counts as a failed attempt.
    pub fn require_success_status(self) -> Self {
        self.with_validator(|resp: &HttpResponse| {
            if resp.is_success() {
                Ok(())
            } else {
                Err(format!("unexpected status {}", resp.status))
            }
        })
    }
}

impl<T: Transport> HedgedClient<T> {
    /// Creates a client over an arbitrary transport.
    ///
    /// # Arguments
    /// * `transport` - The request capability raced against every target
    /// * `cfg` - Round budget and optional per-attempt bound
    pub fn new(transport: T, cfg: HedgeConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            cfg,
            validator: None,
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Installs a validity predicate every response must pass to count as a success.
    ///
    /// A rejected response is treated exactly like a transport failure.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&T::Response) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Returns the hedging configuration.
    pub fn config(&self) -> &HedgeConfig {
        &self.cfg
    }

    /// Number of attempt tasks currently running across all rounds of this client.
    ///
    /// Always back to its previous value once a `dispatch` call has returned.
    pub fn active_attempts(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Runs one round against `targets`, bounded by `budget`.
    ///
    /// Returns only after every attempt has finished or acknowledged
    /// cancellation. An empty target list is reported as
    /// [`Outcome::AllFailed`] without launching anything.
    pub async fn dispatch<I>(&self, targets: I, budget: Duration) -> Outcome<T::Response>
    where
        I: IntoIterator<Item = Target>,
    {
        let attempts = targets
            .into_iter()
            .map(|target| {
                Attempt::new(
                    target,
                    self.transport.clone(),
                    self.validator.clone(),
                    self.cfg.attempt_timeout,
                )
            })
            .collect();

        round::run(attempts, budget, &self.active).await
    }

    /// Runs one round with the configured request budget.
    pub async fn dispatch_default<I>(&self, targets: I) -> Outcome<T::Response>
    where
        I: IntoIterator<Item = Target>,
    {
        self.dispatch(targets, self.cfg.request_budget).await
    }

    /// Like [`dispatch_default`](Self::dispatch_default), with timeouts and
    /// total failure reported as [`HedgedError`].
    pub async fn try_dispatch<I>(&self, targets: I) -> Result<Winner<T::Response>, HedgedError>
    where
        I: IntoIterator<Item = Target>,
    {
        self.dispatch_default(targets).await.into_result()
    }
}
