use std::time::Duration;

use crate::config::{Config, DEFAULT_INTERVAL};
use crate::random::Random;

/// The wait before one retry.
///
/// Without jitter the wait is exactly `base`. With jitter, `base` is the low end of the jitter
/// window and `range` its width, high end included: the wait is `base` plus a random value
/// below `range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    base: Duration,
    range: Duration,
}

impl Interval {
    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn range(&self) -> Duration {
        self.range
    }

    /// Picks the wait for this interval. `random` is only consulted when there is a jitter window.
    pub fn wait(&self, random: &dyn Random) -> Duration {
        let range = duration_nanos(self.range);
        if range == 0 {
            self.base
        } else {
            self.base + Duration::from_nanos(random.below(range))
        }
    }
}

/// Precomputes the wait before every retry configured in `config`.
///
/// Entry `i` is the wait before retry `i`. The result is empty when no retries are configured.
pub fn compute_intervals(config: &Config) -> Vec<Interval> {
    if config.retries == 0 {
        return Vec::new();
    }

    let mut base = if config.interval.is_zero() {
        DEFAULT_INTERVAL
    } else {
        config.interval
    };
    let grows = config.multiplier > 0.0 && config.multiplier != 1.0;

    let mut bases = Vec::with_capacity(config.retries);
    bases.push(base);
    for _ in 1..config.retries {
        if grows {
            base = scale(base, config.multiplier);
        }
        bases.push(base);
    }

    let jitter = config.jitter;
    if jitter > 0.0 && jitter < 1.0 {
        bases
            .into_iter()
            .map(|base| {
                let low = scale(base, 1.0 - jitter);
                let high = scale(base, 1.0 + jitter);
                Interval {
                    base: low,
                    range: high - low + Duration::from_nanos(1),
                }
            })
            .collect()
    } else {
        bases
            .into_iter()
            .map(|base| Interval {
                base,
                range: Duration::ZERO,
            })
            .collect()
    }
}

/// `duration * factor`, rounded to the nearest nanosecond.
fn scale(duration: Duration, factor: f64) -> Duration {
    Duration::from_nanos((duration_nanos(duration) as f64 * factor).round() as u64)
}

fn duration_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
