// src/token_bucket.rs

// token-limiter: an in-memory rate limiter based on the Token Bucket algorithm.

// dependencies
use crate::clock::{Clock, MonotonicClock};
use crate::config::TokenBucketConfig;
use crate::context::Context;
use crate::errors::{RateLimiterError, WaitError};
use crate::rate_limiter::RateLimiter;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, trace};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

// shortest retry delay, so a waiter always yields to the timer
const MIN_RETRY_DELAY: Duration = Duration::from_nanos(1);

/// Mutable part of the bucket, always read and written together under one lock.
#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill_nanos: u64,
}

/// The TokenBucket model.
/// C is the clock type, defaulting to MonotonicClock.
///
/// The bucket starts full. Tokens refill continuously at `rate` per second up
/// to `max_tokens`; every admission takes exactly one. Share an instance
/// between tasks with `Arc`; separate instances never share state.
#[derive(Debug)]
pub struct TokenBucket<C = MonotonicClock>
where
    C: Clock,
{
    rate: f64,
    max_tokens: f64,
    state: Mutex<BucketState>,
    clock: C,
}

impl TokenBucket<MonotonicClock> {
    /// Create a bucket admitting `max_operations` per `period`, holding at most
    /// `burst_capacity` tokens.
    ///
    /// Fails if any parameter is zero.
    pub fn new(
        max_operations: u64,
        period: Duration,
        burst_capacity: u64,
    ) -> Result<Self, RateLimiterError> {
        let config = TokenBucketConfig::new(max_operations, period, burst_capacity);
        Self::with_config(config, MonotonicClock::new())
    }
}

// methods for the TokenBucket type
impl<C> TokenBucket<C>
where
    C: Clock,
{
    // method to create a new token bucket from a config object
    pub fn with_config(config: TokenBucketConfig, clock: C) -> Result<Self, RateLimiterError> {
        config.validate()?;

        let rate = config.rate_per_second();
        let max_tokens = config.burst_capacity as f64;
        let now = clock.now();
        debug!(rate, burst = max_tokens, "token bucket created");

        Ok(Self {
            rate,
            max_tokens,
            state: Mutex::new(BucketState {
                tokens: max_tokens,
                last_refill_nanos: now,
            }),
            clock,
        })
    }

    // accessor method to return the refill rate in tokens per second
    pub fn rate(&self) -> f64 {
        self.rate
    }

    // accessor method to return the burst capacity
    pub fn burst(&self) -> f64 {
        self.max_tokens
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current token count, brought up to date first. Nothing is consumed.
    pub fn available_tokens(&self) -> f64 {
        let mut state = self.state.lock();
        self.refill(&mut state);
        state.tokens
    }

    // brings the token count up to date; caller must hold the lock
    fn refill(&self, state: &mut BucketState) {
        let now = self.clock.now();
        let elapsed = now.saturating_sub(state.last_refill_nanos) as f64 / NANOS_PER_SEC;

        state.tokens = (state.tokens + elapsed * self.rate).min(self.max_tokens);
        // a clock reading behind the last refill must not re-credit time later
        state.last_refill_nanos = state.last_refill_nanos.max(now);
    }

    // takes one token, or reports how long until one should be available
    fn try_acquire(&self) -> Result<(), Duration> {
        let mut state = self.state.lock();
        self.refill(&mut state);

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            return Ok(());
        }

        let tokens_needed = 1.0 - state.tokens;
        let delay = Duration::try_from_secs_f64(tokens_needed / self.rate)
            .unwrap_or(Duration::MAX)
            .max(MIN_RETRY_DELAY);
        Err(delay)
    }
}

#[async_trait]
impl<C> RateLimiter for TokenBucket<C>
where
    C: Clock,
{
    fn allow(&self) -> bool {
        match self.try_acquire() {
            Ok(()) => true,
            Err(retry_after) => {
                trace!(?retry_after, "token bucket empty, request denied");
                false
            }
        }
    }

    /// Retries optimistically: after sleeping for the computed delay the
    /// bucket is checked again, since another caller may have taken the
    /// token in the meantime. There is no fairness between waiters, and an
    /// `allow` caller arriving at the right moment can take a token a
    /// long-standing waiter was about to claim.
    async fn wait(&self, ctx: &Context) -> Result<(), WaitError> {
        loop {
            // the lock is released before suspending
            let delay = match self.try_acquire() {
                Ok(()) => return Ok(()),
                Err(delay) => delay,
            };
            trace!(?delay, "no token available, waiting");

            tokio::select! {
                biased;
                err = ctx.done() => {
                    debug!(%err, "wait ended before a token was available");
                    return Err(err);
                }
                _ = sleep(delay) => {}
            }
        }
    }
}
