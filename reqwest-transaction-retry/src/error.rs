use thiserror::Error;

/// Errors raised by the retry client itself, surfaced to callers as
/// [`reqwest_transaction::Error::Middleware`].
#[derive(Error, Debug)]
pub enum RetryError {
    /// A fresh copy of the request could not be produced for the next attempt.
    #[error("Failed to replay the request body for retry attempt #{attempt}")]
    BodyReplay {
        attempt: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// The request body is a stream, which is consumed by the first attempt.
#[derive(Error, Debug)]
#[error("Request object is not clonable. Are you passing a streaming body?")]
pub struct NotReplayable;
