// src/lib.rs

//! # Token Limiter
//!
//! An in-memory rate limiter based on the Token Bucket algorithm.
//!
//! Every limiter implements the [`RateLimiter`] contract: a non-blocking
//! [`allow`](RateLimiter::allow) and an async [`wait`](RateLimiter::wait) that
//! suspends until a token is available or the caller's [`Context`] fires.
//!
//! ## Quick Example
//!
//! ```rust
//! use std::time::Duration;
//! use token_limiter::{Context, RateLimiter, TokenBucket};
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)] async fn main() {
//! // 10 operations per second, bursts of up to 5
//! let limiter = TokenBucket::new(10, Duration::from_secs(1), 5).unwrap();
//!
//! if limiter.allow() {
//!     println!("Request allowed");
//! }
//!
//! let ctx = Context::with_timeout(Duration::from_secs(1));
//! match limiter.wait(&ctx).await {
//!     Ok(()) => println!("Request allowed after waiting"),
//!     Err(e) => println!("Gave up: {e}"),
//! }
//! # }
//! ```

// private modules
mod clock;
mod config;
mod context;
mod errors;
mod rate_limiter;
mod token_bucket;

// public API exports
pub use clock::{Clock, MonotonicClock};
pub use config::TokenBucketConfig;
pub use context::{CancelHandle, Context};
pub use errors::{RateLimiterError, WaitError};
pub use rate_limiter::RateLimiter;
pub use token_bucket::TokenBucket;
