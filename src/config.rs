// src/config.rs

//! Configuration types for the token limiter

// dependencies
use crate::errors::RateLimiterError;
use std::time::Duration;

/// Configuration for token bucket behavior: `max_operations` per `period`,
/// with at most `burst_capacity` tokens banked.
#[derive(Debug, Clone)]
pub struct TokenBucketConfig {
    pub(crate) max_operations: u64,
    pub(crate) period: Duration,
    pub(crate) burst_capacity: u64,
}

impl TokenBucketConfig {
    /// Create a new configuration allowing `max_operations` per `period`
    pub fn new(max_operations: u64, period: Duration, burst_capacity: u64) -> Self {
        Self {
            max_operations,
            period,
            burst_capacity,
        }
    }

    /// Builder-style: set operations per period
    pub fn operations(mut self, max_operations: u64) -> Self {
        self.max_operations = max_operations;
        self
    }

    /// Builder-style: set the period
    pub fn period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Builder-style: set burst capacity
    pub fn burst(mut self, burst_capacity: u64) -> Self {
        self.burst_capacity = burst_capacity;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), RateLimiterError> {
        if self.max_operations == 0 {
            return Err(RateLimiterError::InvalidOperations);
        }
        if self.period.is_zero() {
            return Err(RateLimiterError::InvalidPeriod);
        }
        if self.burst_capacity == 0 {
            return Err(RateLimiterError::InvalidBurst);
        }
        Ok(())
    }

    /// Refill rate in tokens per second. Only meaningful for a valid config.
    pub fn rate_per_second(&self) -> f64 {
        self.max_operations as f64 / self.period.as_secs_f64()
    }
}
