//! This crate provides the transaction boundary shared by [`reqwest`] based executors: the
//! [`Executor`] capability, a cancellable [`Context`] carried in the request [`Extensions`],
//! and [`drain_and_close`] for releasing response bodies that will never be read.
//!
//! Any [`reqwest::Client`] is an executor. Since `Client` has an inherent `execute` method, call
//! the trait method with its full path. The client honours the context found in the extensions, so
//! canceling the context (or letting its deadline pass) stops the in-flight request:
//!
//! ```
//! use http::Extensions;
//! use reqwest::{Client, Method, Request, Url};
//! use reqwest_transaction::{Context, Executor};
//! use std::time::Duration;
//!
//! async fn run() -> reqwest_transaction::Result<()> {
//!     let client = Client::new();
//!     let url = Url::parse("https://truelayer.com").unwrap();
//!
//!     let mut extensions = Extensions::new();
//!     extensions.insert(Context::background().with_timeout(Duration::from_secs(5)));
//!
//!     let resp = Executor::execute(&client, Request::new(Method::GET, url), &mut extensions).await?;
//!     println!("status: {}", resp.status());
//!     Ok(())
//! }
//! ```
//!
//! [`Extensions`]: http::Extensions
mod body;
mod context;
mod error;
mod executor;

pub use body::drain_and_close;
pub use context::{Context, ContextError};
pub use error::{Error, Result};
pub use executor::Executor;
