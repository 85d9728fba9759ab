use rand::Rng;

/// Source of randomness for picking a wait inside a jitter window.
///
/// It is consulted once per retry, and only when jitter is enabled.
pub trait Random: 'static + Send + Sync {
    /// Returns a uniformly distributed value in `[0, n)`. `n` is never zero.
    fn below(&self, n: u64) -> u64;
}

/// The default [`Random`]: the thread-local generator, seeded by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl Random for ThreadRandom {
    fn below(&self, n: u64) -> u64 {
        rand::rng().random_range(0..n)
    }
}
