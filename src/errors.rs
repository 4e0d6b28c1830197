// src/errors.rs

// error handling for the token limiter types

// dependencies
use thiserror::Error;

/// Error type for TokenBucket construction issues.
/// A limiter is never built from parameters that would give it a zero,
/// negative or infinite refill rate.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateLimiterError {
    #[error("Operations per period must be positive")]
    InvalidOperations, // for max_operations == 0
    #[error("Period must be positive")]
    InvalidPeriod, // for a zero-length period
    #[error("Burst capacity must be positive")]
    InvalidBurst, // for burst_capacity == 0
}

/// Error returned by `wait` when the caller's context fires before a token
/// could be consumed. No token is consumed in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WaitError {
    /// The context was cancelled through its `CancelHandle`.
    #[error("wait cancelled")]
    Cancelled,
    /// The context's deadline passed.
    #[error("wait deadline exceeded")]
    DeadlineExceeded,
}
