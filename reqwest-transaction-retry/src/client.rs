//! `RetryClient` implements retrying transactions on transient failures.

use futures::future::poll_fn;
use http::Extensions;
use reqwest::{Client, Request, Response};
use reqwest_transaction::{drain_and_close, Context, Error, Executor, Result};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::check::{Check, DefaultCheck};
use crate::config::Config;
use crate::error::{NotReplayable, RetryError};
use crate::interval::{compute_intervals, Interval};
use crate::random::{Random, ThreadRandom};
use crate::state::AttemptState;
use crate::timer::{Timer, TokioTimer};

/// `RetryClient` runs a transaction through an [`Executor`] and attempts it again, after a
/// backoff wait, for as long as its [`Check`] asks for it and retries are left.
///
/// The waits are computed once from the [`Config`] and shared by every transaction run through
/// the client, and by every client derived from it with [`then`](RetryClient::then).
///
///```rust
///     use reqwest_transaction_retry::{Config, RetryClient};
///     use std::time::Duration;
///
///     // Retry up to 3 times, waiting 100ms, 200ms and 400ms give or take 10%.
///     let config = Config {
///         retries: 3,
///         interval: Duration::from_millis(100),
///         multiplier: 2.0,
///         jitter: 0.1,
///         ..Config::default()
///     };
///
///     let client = RetryClient::new(config);
///     assert_eq!(client.retries(), 3);
///```
pub struct RetryClient<E = Client> {
    executor: E,
    schedule: Arc<Schedule>,
}

struct Schedule {
    intervals: Box<[Interval]>,
    max_elapsed_time: Option<Duration>,
    check: Arc<dyn Check>,
    timer: Arc<dyn Timer>,
    random: Arc<dyn Random>,
}

impl RetryClient<Client> {
    /// Construct a `RetryClient` running transactions through a default [`reqwest::Client`].
    pub fn new(config: Config) -> Self {
        Self::with_executor(config, Client::new())
    }
}

impl<E: Executor> RetryClient<E> {
    /// Construct a `RetryClient` running transactions through `executor`.
    pub fn with_executor(config: Config, executor: E) -> Self {
        let schedule = Schedule {
            intervals: compute_intervals(&config).into_boxed_slice(),
            max_elapsed_time: config.max_elapsed_time,
            check: config.check.unwrap_or_else(|| Arc::new(DefaultCheck)),
            timer: config.timer.unwrap_or_else(|| Arc::new(TokioTimer)),
            random: config.random.unwrap_or_else(|| Arc::new(ThreadRandom)),
        };
        Self {
            executor,
            schedule: Arc::new(schedule),
        }
    }

    /// Number of retries after the initial attempt.
    pub fn retries(&self) -> usize {
        self.schedule.intervals.len()
    }

    /// The backoff interval before each retry.
    pub fn intervals(&self) -> &[Interval] {
        &self.schedule.intervals
    }

    /// Returns a client with the same backoff and strategies, running transactions through
    /// `next` instead.
    pub fn then<N: Executor>(&self, next: N) -> RetryClient<N> {
        RetryClient {
            executor: next,
            schedule: Arc::clone(&self.schedule),
        }
    }

    async fn execute_with_retry(
        &self,
        req: Request,
        extensions: &mut Extensions,
        ctx: &Context,
    ) -> Result<Response> {
        let schedule = &*self.schedule;
        let mut state = AttemptState::new(self.retries());

        // The first attempt consumes the request, keep a pristine copy to replay.
        let template = if schedule.intervals.is_empty() {
            None
        } else {
            req.try_clone()
        };

        extensions.insert(state.clone());
        let mut outcome = self.executor.execute(req, extensions).await;

        for interval in schedule.intervals.iter() {
            if !schedule.check.should_retry(&outcome) {
                return outcome;
            }

            let wait = interval.wait(&*schedule.random);
            let mut countdown = schedule.timer.start(wait);

            let previous = state.advance(outcome);
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Retry attempt #{}. Sleeping {:?} before the next attempt",
                state.attempt(),
                wait
            );
            tokio::select! {
                biased;
                _ = ctx.done() => {}
                _ = drain_and_close(previous) => {}
            }

            let waited = tokio::select! {
                biased;
                err = ctx.done() => Err(err),
                _ = poll_fn(|cx| countdown.poll_fired(cx)) => Ok(()),
            };
            if let Err(err) = waited {
                countdown.stop();
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    "Transaction ended while waiting for retry attempt #{}: {}",
                    state.attempt(),
                    err
                );
                return Err(err.into());
            }

            let req = match template.as_ref().and_then(Request::try_clone) {
                Some(req) => req,
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        "Cannot replay the request body for retry attempt #{}",
                        state.attempt()
                    );
                    return Err(Error::middleware(RetryError::BodyReplay {
                        attempt: state.attempt(),
                        source: Box::new(NotReplayable),
                    }));
                }
            };

            extensions.insert(state.clone());
            outcome = self.executor.execute(req, extensions).await;

            if let Some(err) = ctx.err() {
                // The context is done, close the response without draining it.
                drop(outcome);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    "Transaction ended during retry attempt #{}: {}",
                    state.attempt(),
                    err
                );
                return Err(err.into());
            }
        }

        outcome
    }
}

#[async_trait::async_trait]
impl<E: Executor> Executor for RetryClient<E> {
    async fn execute(&self, req: Request, extensions: &mut Extensions) -> Result<Response> {
        let parent = Context::from_extensions(extensions);
        let ctx = match self.schedule.max_elapsed_time {
            Some(limit) if !limit.is_zero() => parent.with_timeout(limit),
            _ => parent.with_cancel(),
        };
        let _cancel = ctx.cancel_on_drop();

        // Executors down the stack see this transaction's context and state, the caller gets
        // its own back afterwards.
        let outer_ctx = extensions.insert(ctx.clone());
        let outer_state = extensions.remove::<AttemptState>();

        let outcome = self.execute_with_retry(req, extensions, &ctx).await;

        restore(extensions, outer_ctx);
        restore(extensions, outer_state);
        outcome
    }
}

fn restore<T: Clone + Send + Sync + 'static>(extensions: &mut Extensions, value: Option<T>) {
    match value {
        Some(value) => {
            extensions.insert(value);
        }
        None => {
            extensions.remove::<T>();
        }
    }
}

impl<E: Clone> Clone for RetryClient<E> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            schedule: Arc::clone(&self.schedule),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for RetryClient<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // skipping the strategies
        f.debug_struct("RetryClient")
            .field("executor", &self.executor)
            .field("intervals", &self.schedule.intervals)
            .field("max_elapsed_time", &self.schedule.max_elapsed_time)
            .finish_non_exhaustive()
    }
}
