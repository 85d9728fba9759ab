//! Retry client for [`reqwest_transaction`] executors.
//!
//! [`RetryClient`] wraps an [`Executor`](reqwest_transaction::Executor) and attempts failed
//! transactions again after a precomputed backoff wait. Executors further down the stack can
//! find out which attempt they are running with [`get_state`]:
//!
//! ```
//! use http::Extensions;
//! use reqwest::{Request, Response};
//! use reqwest_transaction::{Executor, Result};
//! use reqwest_transaction_retry::{get_state, Config, RetryClient};
//! use std::time::Duration;
//!
//! struct AttemptLogger<E>(E);
//!
//! #[async_trait::async_trait]
//! impl<E: Executor> Executor for AttemptLogger<E> {
//!     async fn execute(&self, req: Request, extensions: &mut Extensions) -> Result<Response> {
//!         if let Some(state) = get_state(extensions) {
//!             println!("attempt {} of {}", state.attempt() + 1, state.retries() + 1);
//!         }
//!         self.0.execute(req, extensions).await
//!     }
//! }
//!
//! let config = Config {
//!     retries: 2,
//!     interval: Duration::from_millis(100),
//!     multiplier: 2.0,
//!     ..Config::default()
//! };
//! let client = RetryClient::new(config);
//! let logged = client.then(AttemptLogger(reqwest::Client::new()));
//! ```
mod check;
mod client;
mod config;
mod error;
mod interval;
mod random;
mod state;
mod timer;

pub use check::{
    default_on_request_error, default_on_request_failure, default_on_request_success, Check,
    DefaultCheck,
};
pub use client::RetryClient;
pub use config::{Config, DEFAULT_INTERVAL};
pub use error::{NotReplayable, RetryError};
pub use interval::{compute_intervals, Interval};
pub use random::{Random, ThreadRandom};
pub use state::{get_state, AttemptState, ResponseHead};
pub use timer::{Countdown, Timer, TokioTimer};
