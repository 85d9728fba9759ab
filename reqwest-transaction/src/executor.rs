use http::Extensions;
use reqwest::{Client, Request, Response};
use std::sync::Arc;

use crate::context::Context;
use crate::error::{Error, Result};

/// Anything that can carry a request to completion: a plain [`reqwest::Client`], or a decorator
/// which wraps another executor.
///
/// The `extensions` travel with the request for the whole transaction. Decorators use them to
/// hand data to executors deeper in the stack, and the transaction [`Context`] lives there too.
///
/// # Example
///
/// ```
/// use http::Extensions;
/// use reqwest::{Request, Response};
/// use reqwest_transaction::{Executor, Result};
///
/// struct LoggingExecutor<E>(E);
///
/// #[async_trait::async_trait]
/// impl<E: Executor> Executor for LoggingExecutor<E> {
///     async fn execute(&self, req: Request, extensions: &mut Extensions) -> Result<Response> {
///         println!("Request started {:?}", req);
///         let res = self.0.execute(req, extensions).await;
///         println!("Result: {:?}", res);
///         res
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait Executor: 'static + Send + Sync {
    /// Runs one attempt of `req` and returns its outcome.
    async fn execute(&self, req: Request, extensions: &mut Extensions) -> Result<Response>;
}

/// The ambient executor. The request is abandoned as soon as the [`Context`] found in the
/// extensions is done, and the context's error is returned instead.
#[async_trait::async_trait]
impl Executor for Client {
    async fn execute(&self, req: Request, extensions: &mut Extensions) -> Result<Response> {
        let ctx = Context::from_extensions(extensions);
        if let Some(err) = ctx.err() {
            return Err(err.into());
        }
        tokio::select! {
            biased;
            err = ctx.done() => Err(err.into()),
            res = Client::execute(self, req) => res.map_err(Error::from),
        }
    }
}

#[async_trait::async_trait]
impl<E> Executor for Arc<E>
where
    E: Executor + ?Sized,
{
    async fn execute(&self, req: Request, extensions: &mut Extensions) -> Result<Response> {
        (**self).execute(req, extensions).await
    }
}

#[async_trait::async_trait]
impl<E> Executor for Box<E>
where
    E: Executor + ?Sized,
{
    async fn execute(&self, req: Request, extensions: &mut Extensions) -> Result<Response> {
        (**self).execute(req, extensions).await
    }
}
