use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::{errors::AttemptError, target::Target, transport::Transport};

/// Caller-defined acceptability check applied to every received response.
pub type Validator<R> = Arc<dyn Fn(&R) -> Result<(), String> + Send + Sync>;

/// One request against one target within a round.
pub(crate) struct Attempt<T: Transport> {
    pub(crate) target: Target,
    transport: Arc<T>,
    validator: Option<Validator<T::Response>>,
    timeout: Option<Duration>,
}

impl<T: Transport> Attempt<T> {
    pub(crate) fn new(
        target: Target,
        transport: Arc<T>,
        validator: Option<Validator<T::Response>>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            target,
            transport,
            validator,
            timeout,
        }
    }

    /// Runs the request to completion or until `token` is cancelled.
    ///
    /// Reports exactly one outcome. Cancellation is checked first, so an
    /// attempt that finishes in the same poll as the round is cancelled still
    /// reports `Cancelled`. Dropping the in-flight request releases its
    /// connection.
    pub(crate) async fn run(
        self,
        token: CancellationToken,
    ) -> (Target, Result<T::Response, AttemptError>) {
        let request = async {
            let resp = match self.timeout {
                Some(limit) => time::timeout(limit, self.transport.send(&self.target))
                    .await
                    .map_err(|_| AttemptError::AttemptTimeout(limit))??,
                None => self.transport.send(&self.target).await?,
            };

            if let Some(validate) = &self.validator {
                validate(&resp).map_err(AttemptError::Rejected)?;
            }

            Ok::<_, AttemptError>(resp)
        };

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => Err(AttemptError::Cancelled),
            res = request => res,
        };

        (self.target, result)
    }
}

/// Counts an attempt as active from launch until its task is dropped.
pub(crate) struct ActiveGuard(Arc<AtomicUsize>);

impl ActiveGuard {
    pub(crate) fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter.clone())
    }
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::TransportError;

    use super::*;

    struct Fixed(Result<&'static str, &'static str>, Duration);

    impl Transport for Fixed {
        type Response = &'static str;

        async fn send(&self, _target: &Target) -> Result<&'static str, TransportError> {
            time::sleep(self.1).await;
            self.0.map_err(|e| TransportError::Other(e.to_string()))
        }
    }

    fn attempt(transport: Fixed) -> Attempt<Fixed> {
        Attempt::new(Target::new("t"), Arc::new(transport), None, None)
    }

    #[tokio::test(start_paused = true)]
    async fn success_is_reported_with_its_target() {
        let (target, res) = attempt(Fixed(Ok("body"), Duration::from_millis(10)))
            .run(CancellationToken::new())
            .await;
        assert_eq!(target.as_str(), "t");
        assert_eq!(res.unwrap(), "body");
    }

    #[tokio::test(start_paused = true)]
    async fn transport_error_becomes_failure() {
        let (_, res) = attempt(Fixed(Err("refused"), Duration::from_millis(10)))
            .run(CancellationToken::new())
            .await;
        assert!(matches!(res, Err(AttemptError::Transport(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_abandons_the_wait() {
        let token = CancellationToken::new();
        let run = tokio::spawn(
            attempt(Fixed(Ok("late"), Duration::from_secs(60))).run(token.clone()),
        );
        time::sleep(Duration::from_millis(5)).await;
        token.cancel();
        let (_, res) = run.await.unwrap();
        assert!(matches!(res, Err(AttemptError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn validator_rejection_is_a_failure() {
        let validator: Validator<&'static str> = Arc::new(|body: &&'static str| {
            if body.is_empty() {
                Err("empty body".to_string())
            } else {
                Ok(())
            }
        });
        let attempt = Attempt::new(
            Target::new("t"),
            Arc::new(Fixed(Ok(""), Duration::from_millis(1))),
            Some(validator),
            None,
        );
        let (_, res) = attempt.run(CancellationToken::new()).await;
        assert!(matches!(res, Err(AttemptError::Rejected(msg)) if msg == "empty body"));
    }

    #[tokio::test(start_paused = true)]
    async fn per_attempt_bound_fails_slow_requests() {
        let attempt = Attempt::new(
            Target::new("t"),
            Arc::new(Fixed(Ok("slow"), Duration::from_secs(5))),
            None,
            Some(Duration::from_secs(1)),
        );
        let (_, res) = attempt.run(CancellationToken::new()).await;
        assert!(matches!(res, Err(AttemptError::AttemptTimeout(d)) if d == Duration::from_secs(1)));
    }

    #[test]
    fn guard_tracks_active_count() {
        let counter = Arc::new(AtomicUsize::new(0));
        let a = ActiveGuard::enter(&counter);
        let b = ActiveGuard::enter(&counter);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        drop(a);
        drop(b);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
