use http::StatusCode;
use reqwest::Response;
use reqwest_transaction::{Error, Result};

/// Decides whether the outcome of an attempt is worth another attempt.
///
/// The outcome of a transaction could be:
/// - [`reqwest::Response`] In case the request has been sent and received correctly.
///   This could however still mean that the server responded with an erroneous response,
///   for example an HTTP status code of 503.
/// - [`reqwest_transaction::Error`] In this case the attempt actually failed.
///   This could, for example, be caused by a timeout on the connection.
///
/// A check is a pure function of the outcome. It is not consulted at all when no retries are
/// left.
///
/// Example:
///
/// ```
/// use reqwest::Response;
/// use reqwest_transaction::Result;
/// use reqwest_transaction_retry::{default_on_request_failure, Check, Config, RetryClient};
///
/// // Just a toy example, retry when the successful response code is 201, else do nothing.
/// struct Retry201;
///
/// impl Check for Retry201 {
///     fn should_retry(&self, outcome: &Result<Response>) -> bool {
///         match outcome {
///             Ok(success) => success.status() == 201,
///             Err(error) => default_on_request_failure(error),
///         }
///     }
/// }
///
/// let config = Config {
///     retries: 2,
///     ..Config::default()
/// }
/// .with_check(Retry201);
/// let client = RetryClient::new(config);
/// ```
pub trait Check: 'static + Send + Sync {
    fn should_retry(&self, outcome: &Result<Response>) -> bool;
}

impl<F> Check for F
where
    F: Fn(&Result<Response>) -> bool + 'static + Send + Sync,
{
    fn should_retry(&self, outcome: &Result<Response>) -> bool {
        (self)(outcome)
    }
}

/// The default [`Check`] for [`RetryClient`](crate::RetryClient).
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCheck;

impl Check for DefaultCheck {
    fn should_retry(&self, outcome: &Result<Response>) -> bool {
        match outcome {
            Ok(success) => default_on_request_success(success),
            Err(error) => default_on_request_failure(error),
        }
    }
}

/// Default response retry check.
///
/// Will only retry if the status says the same request may succeed later:
/// * 408 (request timeout) or 429 (too many requests)
/// * 502 (bad gateway), 503 (service unavailable) or 504 (gateway timeout)
pub fn default_on_request_success(success: &Response) -> bool {
    matches!(
        success.status(),
        StatusCode::REQUEST_TIMEOUT
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

/// Default failure retry check for a [`reqwest_transaction::Error`].
///
/// A done transaction context is never retried: a deadline means stop, even though it looks
/// like a timeout.
pub fn default_on_request_failure(error: &Error) -> bool {
    match error {
        Error::Context(_) => false,
        Error::Reqwest(error) => default_on_request_error(error),
        Error::Middleware(error) => error.chain().any(|cause| is_transient(cause)),
    }
}

/// Default failure retry check for the [`reqwest::Error`] part of a
/// [`reqwest_transaction::Error`].
///
/// Will only retry if the request failed due to a network error
pub fn default_on_request_error(error: &reqwest::Error) -> bool {
    if error.is_timeout() || error.is_connect() {
        true
    } else if error.is_body() || error.is_decode() || error.is_builder() || error.is_redirect() {
        false
    } else if error.is_request() {
        // hyper::Error(IncompleteMessage) is raised when the server cuts the connection halfway
        // through an otherwise well formed response, hyper::Error(Canceled) when the connection
        // is gracefully closed on the server side.
        if let Some(hyper_error) = get_source_error_type::<hyper::Error>(error) {
            hyper_error.is_incomplete_message()
                || hyper_error.is_canceled()
                || get_source_error_type::<std::io::Error>(hyper_error).is_some_and(is_transient_io)
        } else {
            false
        }
    } else {
        false
    }
}

/// Returns true if `cause` is an io error worth another attempt.
fn is_transient(cause: &(dyn std::error::Error + 'static)) -> bool {
    cause
        .downcast_ref::<std::io::Error>()
        .is_some_and(is_transient_io)
}

fn is_transient_io(error: &std::io::Error) -> bool {
    matches!(
        error.kind(),
        std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::TimedOut
            | std::io::ErrorKind::Interrupted
    )
}

/// Downcasts the given err source into T.
fn get_source_error_type<T: std::error::Error + 'static>(
    err: &dyn std::error::Error,
) -> Option<&T> {
    let mut source = err.source();

    while let Some(err) = source {
        if let Some(err) = err.downcast_ref::<T>() {
            return Some(err);
        }

        source = err.source();
    }
    None
}
