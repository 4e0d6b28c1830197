// src/clock.rs

// clock module definition and implementations

// dependencies
use tokio::time::Instant;

/// Clock trait to abstract time retrieval.
/// Implementors must be thread-safe (Send + Sync).
/// The `now` method returns monotonic nanoseconds from an implementation-defined
/// origin; only differences between readings are meaningful.
/// The TokenBucket uses the clock to work out how much to refill on each access.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

/// Default clock, anchored on a `tokio::time::Instant` taken at construction.
/// Follows tokio's paused clock when the runtime's time is paused.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> u64 {
        // saturates after ~584 years of uptime
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}
