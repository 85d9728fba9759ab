use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::time::Duration;
use tokio::time::Sleep;

/// Starts the one-shot waits between attempts.
pub trait Timer: 'static + Send + Sync {
    fn start(&self, wait: Duration) -> Box<dyn Countdown>;
}

/// A pending wait started by a [`Timer`].
pub trait Countdown: Send {
    /// Completes once the wait has elapsed.
    ///
    /// Completes at most once, and never after a successful [`stop`](Countdown::stop).
    fn poll_fired(&mut self, cx: &mut Context<'_>) -> Poll<()>;

    /// Cancels the wait. Returns `true` if this call stopped a wait that had not fired yet;
    /// further calls return `false`.
    fn stop(&mut self) -> bool;
}

/// The default [`Timer`], backed by [`tokio::time::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn start(&self, wait: Duration) -> Box<dyn Countdown> {
        Box::new(TokioCountdown {
            sleep: Some(Box::pin(tokio::time::sleep(wait))),
        })
    }
}

struct TokioCountdown {
    sleep: Option<Pin<Box<Sleep>>>,
}

impl Countdown for TokioCountdown {
    fn poll_fired(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        match self.sleep.as_mut() {
            Some(sleep) => {
                ready!(sleep.as_mut().poll(cx));
                self.sleep = None;
                Poll::Ready(())
            }
            None => Poll::Pending,
        }
    }

    fn stop(&mut self) -> bool {
        match self.sleep.take() {
            Some(sleep) => !sleep.is_elapsed(),
            None => false,
        }
    }
}
