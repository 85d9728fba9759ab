use reqwest::StatusCode;
use thiserror::Error;

use crate::context::ContextError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// There was an error running some middleware
    #[error("Middleware error: {0}")]
    Middleware(#[from] anyhow::Error),
    /// Error from the underlying reqwest client
    #[error("Request error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// The transaction context was canceled or its deadline passed
    #[error("Transaction error: {0}")]
    Context(#[from] ContextError),
}

impl Error {
    pub fn middleware<E>(err: E) -> Self
    where
        E: 'static + Send + Sync + std::error::Error,
    {
        Error::Middleware(err.into())
    }

    /// Returns the context error, if the transaction ended because of its context.
    pub fn context_error(&self) -> Option<ContextError> {
        match self {
            Error::Context(e) => Some(*e),
            _ => None,
        }
    }

    /// Returns true if the transaction context was canceled.
    pub fn is_canceled(&self) -> bool {
        self.context_error() == Some(ContextError::Canceled)
    }

    /// Returns true if the transaction context ran past its deadline.
    pub fn is_deadline_exceeded(&self) -> bool {
        self.context_error() == Some(ContextError::DeadlineExceeded)
    }

    /// Returns true if the error is related to a timeout of the underlying client.
    ///
    /// A context deadline is not a client timeout, see [`is_deadline_exceeded`](Self::is_deadline_exceeded).
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Reqwest(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Returns true if the error is related to connect
    pub fn is_connect(&self) -> bool {
        match self {
            Error::Reqwest(e) => e.is_connect(),
            _ => false,
        }
    }

    /// Returns true if the error is related to the request
    pub fn is_request(&self) -> bool {
        match self {
            Error::Reqwest(e) => e.is_request(),
            _ => false,
        }
    }

    /// Returns true if the error is related to the request or response body
    pub fn is_body(&self) -> bool {
        match self {
            Error::Reqwest(e) => e.is_body(),
            _ => false,
        }
    }

    /// Returns the status code, if the error was generated from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Reqwest(e) => e.status(),
            _ => None,
        }
    }
}
