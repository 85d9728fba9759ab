use http::{Extensions, HeaderMap, StatusCode, Version};
use reqwest::{Response, Url};
use reqwest_transaction::{Error, Result};
use std::sync::Arc;

/// Retry bookkeeping of the transaction a request belongs to.
///
/// The [`RetryClient`](crate::RetryClient) stores a snapshot in the request extensions before
/// every attempt, so executors further down the stack can read it with [`get_state`].
#[derive(Debug, Clone)]
pub struct AttemptState {
    attempt: usize,
    retries: usize,
    previous: Option<Previous>,
}

#[derive(Debug, Clone)]
enum Previous {
    Response(ResponseHead),
    Error(Arc<Error>),
}

/// What is left of a response whose body has been drained.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    pub status: StatusCode,
    pub version: Version,
    pub headers: HeaderMap,
    pub url: Url,
}

impl ResponseHead {
    fn of(response: &Response) -> Self {
        Self {
            status: response.status(),
            version: response.version(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }
}

/// Returns the attempt state of the transaction the extensions belong to, if it is run by a
/// [`RetryClient`](crate::RetryClient).
pub fn get_state(extensions: &Extensions) -> Option<&AttemptState> {
    extensions.get::<AttemptState>()
}

impl AttemptState {
    pub(crate) fn new(retries: usize) -> Self {
        Self {
            attempt: 0,
            retries,
            previous: None,
        }
    }

    /// Number of attempts completed before the current one.
    pub fn attempt(&self) -> usize {
        self.attempt
    }

    /// Number of retries configured for the transaction.
    pub fn retries(&self) -> usize {
        self.retries
    }

    /// The response of the previous attempt. Its body has already been drained.
    pub fn previous_response(&self) -> Option<&ResponseHead> {
        match &self.previous {
            Some(Previous::Response(head)) => Some(head),
            _ => None,
        }
    }

    /// The error of the previous attempt.
    pub fn previous_error(&self) -> Option<&Error> {
        match &self.previous {
            Some(Previous::Error(error)) => Some(error),
            _ => None,
        }
    }

    /// Records the outcome of the current attempt and moves on to the next one.
    ///
    /// The returned response, if any, still holds its body and must be drained by the caller.
    pub(crate) fn advance(&mut self, outcome: Result<Response>) -> Option<Response> {
        self.attempt += 1;
        match outcome {
            Ok(response) => {
                self.previous = Some(Previous::Response(ResponseHead::of(&response)));
                Some(response)
            }
            Err(error) => {
                self.previous = Some(Previous::Error(Arc::new(error)));
                None
            }
        }
    }
}
