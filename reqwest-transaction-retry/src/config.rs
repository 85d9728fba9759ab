use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::check::Check;
use crate::random::Random;
use crate::timer::Timer;

/// Base wait before the first retry when [`Config::interval`] is zero.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Backoff configuration of a [`RetryClient`](crate::RetryClient).
///
/// The wait before retry `n` (0-based) is `interval * multiplier^n`, spread over
/// `[1 - jitter, 1 + jitter]` of that value when jitter is enabled.
///
/// ```
/// use reqwest_transaction_retry::Config;
/// use std::time::Duration;
///
/// let config = Config {
///     retries: 3,
///     interval: Duration::from_millis(100),
///     multiplier: 2.0,
///     jitter: 0.25,
///     max_elapsed_time: Some(Duration::from_secs(5)),
///     ..Config::default()
/// };
/// ```
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// How many times a transaction is retried after the initial attempt.
    pub retries: usize,
    /// Wait before the first retry. Zero means [`DEFAULT_INTERVAL`].
    pub interval: Duration,
    /// Growth factor of the wait between successive retries. Values `<= 0` or `== 1` keep the
    /// wait constant.
    pub multiplier: f64,
    /// Relative width of the random window around each wait. Disabled outside of `(0, 1)`.
    pub jitter: f64,
    /// Ceiling on the time spent on all attempts of one transaction, waits included.
    pub max_elapsed_time: Option<Duration>,
    /// Decides whether an outcome is worth another attempt. Defaults to [`DefaultCheck`](crate::DefaultCheck).
    #[cfg_attr(feature = "serde", serde(skip))]
    pub check: Option<Arc<dyn Check>>,
    /// Starts the waits between attempts. Defaults to [`TokioTimer`](crate::TokioTimer).
    #[cfg_attr(feature = "serde", serde(skip))]
    pub timer: Option<Arc<dyn Timer>>,
    /// Picks waits inside the jitter window. Defaults to [`ThreadRandom`](crate::ThreadRandom).
    #[cfg_attr(feature = "serde", serde(skip))]
    pub random: Option<Arc<dyn Random>>,
}

impl Config {
    pub fn with_check<C: Check>(mut self, check: C) -> Self {
        self.check = Some(Arc::new(check));
        self
    }

    pub fn with_timer<T: Timer>(mut self, timer: T) -> Self {
        self.timer = Some(Arc::new(timer));
        self
    }

    pub fn with_random<R: Random>(mut self, random: R) -> Self {
        self.random = Some(Arc::new(random));
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // skipping the strategies
        f.debug_struct("Config")
            .field("retries", &self.retries)
            .field("interval", &self.interval)
            .field("multiplier", &self.multiplier)
            .field("jitter", &self.jitter)
            .field("max_elapsed_time", &self.max_elapsed_time)
            .finish_non_exhaustive()
    }
}
