use std::{
    sync::{atomic::AtomicUsize, Arc},
    time::{Duration, Instant},
};

use tokio::{task::JoinSet, time};

use crate::{
    attempt::{ActiveGuard, Attempt},
    errors::AttemptError,
    outcome::{classify, Outcome, Winner},
    signal::{CancelCause, CancelSignal},
    transport::Transport,
};

/// What an attempt task hands back to the aggregator.
enum Report<R> {
    /// This attempt committed `WonBySuccess`.
    Won(R),
    /// A success that arrived after the round had already stopped.
    Discarded(CancelCause),
    Failed(AttemptError),
}

/// Runs one hedged round: fan out, race to the first success, drain.
///
/// Every attempt runs as its own task against the signal's token, and the
/// deadline runs as an independent timer task racing the same token. The
/// first success and the deadline both go through [`CancelSignal::commit`]
/// from their own tasks, so exactly one of them decides why the round
/// stopped. A success that loses that race is dropped.
///
/// Does not return until every attempt task has finished. If the returned
/// future is dropped, the `JoinSet`s abort the attempts and the timer.
pub(crate) async fn run<T: Transport>(
    attempts: Vec<Attempt<T>>,
    budget: Duration,
    active: &Arc<AtomicUsize>,
) -> Outcome<T::Response> {
    let launched = attempts.len();
    let signal = Arc::new(CancelSignal::new());

    if launched == 0 {
        tracing::debug!("no targets; nothing to race");
        return classify(None, signal.cause(), 0, budget);
    }

    let start = Instant::now();
    let mut timer = JoinSet::new();
    timer.spawn(deadline(signal.clone(), budget));

    let mut racing = JoinSet::new();
    for attempt in attempts {
        let guard = ActiveGuard::enter(active);
        let signal = signal.clone();
        tracing::debug!(endpoint = %attempt.target, "launching attempt");
        racing.spawn(async move {
            let _guard = guard;
            let (target, result) = attempt.run(signal.token()).await;
            let report = match result {
                Ok(response) => match signal.commit(CancelCause::WonBySuccess) {
                    Ok(()) => Report::Won(response),
                    Err(cause) => Report::Discarded(cause),
                },
                Err(err) => Report::Failed(err),
            };
            (target, report)
        });
    }

    let mut winner: Option<Winner<T::Response>> = None;
    let mut failures = 0usize;

    while let Some(joined) = racing.join_next().await {
        match joined {
            Ok((target, Report::Won(response))) => {
                tracing::debug!(
                    endpoint = %target,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "attempt won the round"
                );
                winner = Some(Winner { target, response });
            }
            Ok((target, Report::Discarded(cause))) => {
                tracing::debug!(endpoint = %target, ?cause, "discarding late success");
            }
            Ok((target, Report::Failed(err))) => {
                failures += 1;
                tracing::debug!(endpoint = %target, error = %err, "attempt failed");
            }
            Err(join_err) => {
                failures += 1;
                tracing::error!(error = %join_err, "attempt task did not complete");
            }
        }
    }

    timer.shutdown().await;

    let outcome = classify(winner, signal.cause(), launched, budget);
    tracing::info!(
        outcome = outcome.kind(),
        winner = outcome.winner().map(|w| w.target.as_str()),
        attempts = launched,
        failures,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "round finished"
    );
    outcome
}

/// Commits `DeadlineExpired` once `budget` elapses, unless the round already
/// stopped for another reason.
async fn deadline(signal: Arc<CancelSignal>, budget: Duration) {
    let token = signal.token();
    tokio::select! {
        _ = token.cancelled() => {}
        _ = time::sleep(budget) => {
            if signal.commit(CancelCause::DeadlineExpired).is_ok() {
                tracing::warn!(budget_ms = budget.as_millis() as u64, "round deadline expired");
            }
        }
    }
}
