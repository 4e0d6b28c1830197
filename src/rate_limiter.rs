// src/rate_limiter.rs

// the rate limiter capability contract

// dependencies
use crate::context::Context;
use crate::errors::WaitError;
use async_trait::async_trait;

/// Contract every rate limiting algorithm implements.
///
/// Callers depend only on this trait, so a token bucket can be swapped for
/// another algorithm without touching them. The trait is object safe:
/// `Arc<dyn RateLimiter>` works.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Try to admit one event without blocking.
    ///
    /// Returns `true` if one unit of capacity was consumed, `false` if none
    /// was available (nothing is consumed).
    fn allow(&self) -> bool;

    /// Wait until one unit of capacity is consumed, or `ctx` fires.
    ///
    /// Returns the context's error when it fires first; no capacity is
    /// consumed in that case.
    async fn wait(&self, ctx: &Context) -> Result<(), WaitError>;
}
