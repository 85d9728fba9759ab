use http::Extensions;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Why a [`Context`] is done.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    #[error("context canceled")]
    Canceled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation and deadline scope of a transaction.
///
/// A request carries its context in its [`Extensions`]; requests without one run under
/// [`Context::background`]. Contexts are derived from a parent with [`with_cancel`],
/// [`with_timeout`] or [`with_deadline`]: canceling the parent cancels every context derived
/// from it, and a derived deadline is never later than the parent's.
///
/// Cloning a context is cheap and the clones share the same cancellation state.
///
/// [`with_cancel`]: Context::with_cancel
/// [`with_timeout`]: Context::with_timeout
/// [`with_deadline`]: Context::with_deadline
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never canceled by anyone else and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Returns the context stored in `extensions`, or a background context.
    pub fn from_extensions(extensions: &Extensions) -> Self {
        extensions.get::<Context>().cloned().unwrap_or_default()
    }

    /// Derives a context which can be canceled independently of its parent.
    pub fn with_cancel(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Derives a cancellable context which is done `timeout` from now at the latest.
    ///
    /// A timeout too large to be represented as an instant sets no deadline.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.with_cancel(),
        }
    }

    /// Derives a cancellable context which is done at `deadline` at the latest.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(parent) if parent < deadline => parent,
            _ => deadline,
        };
        Self {
            token: self.token.child_token(),
            deadline: Some(deadline),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancels this context and every context derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns a guard which cancels this context when dropped.
    pub fn cancel_on_drop(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }

    /// Returns why the context is done, or `None` while it is still live.
    pub fn err(&self) -> Option<ContextError> {
        if self.token.is_cancelled() {
            Some(ContextError::Canceled)
        } else if matches!(self.deadline, Some(deadline) if deadline <= Instant::now()) {
            Some(ContextError::DeadlineExceeded)
        } else {
            None
        }
    }

    /// Completes once the context is done, with the reason.
    pub async fn done(&self) -> ContextError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => ContextError::Canceled,
                _ = tokio::time::sleep_until(deadline) => ContextError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                ContextError::Canceled
            }
        }
    }
}
