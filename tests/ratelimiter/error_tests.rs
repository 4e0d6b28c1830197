// tests/ratelimiter/error_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::test_clock::TestClock;
    use std::error::Error;
    use std::time::Duration;
    use token_limiter::{
        Context, RateLimiter, RateLimiterError, TokenBucket, TokenBucketConfig, WaitError,
    };

    #[test]
    fn construction_errors_are_reported_per_parameter() {
        let cases = [
            (0, Duration::from_secs(1), 1, RateLimiterError::InvalidOperations),
            (1, Duration::ZERO, 1, RateLimiterError::InvalidPeriod),
            (1, Duration::from_secs(1), 0, RateLimiterError::InvalidBurst),
        ];

        for (ops, period, burst, expected) in cases {
            match TokenBucket::new(ops, period, burst) {
                Err(e) => assert_eq!(e, expected),
                Ok(_) => panic!("Expected {:?} for ({}, {:?}, {})", expected, ops, period, burst),
            }
        }
    }

    #[test]
    fn error_display_formatting() {
        let err = TokenBucket::new(1, Duration::ZERO, 1).unwrap_err();
        let error_string = format!("{}", err);
        assert!(!error_string.is_empty());
        assert!(error_string.to_lowercase().contains("period"));

        // usable as a boxed std error
        let boxed: Box<dyn Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn wait_reports_deadline_exceeded() {
        let clock = TestClock::new(0.0);
        let limiter = clock.bucket(TokenBucketConfig::new(1, Duration::from_secs(10), 1));
        assert!(limiter.allow());

        let ctx = Context::with_timeout(Duration::from_millis(100));
        let result = limiter.wait(&ctx).await;

        match result {
            Err(WaitError::DeadlineExceeded) => {} // Expected
            other => panic!("Expected DeadlineExceeded, got: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn wait_reports_explicit_cancellation() {
        let clock = TestClock::new(0.0);
        let limiter = clock.bucket(TokenBucketConfig::new(1, Duration::from_secs(10), 1));
        assert!(limiter.allow());

        let (ctx, handle) = Context::background().with_cancel();
        handle.cancel();

        assert_eq!(limiter.wait(&ctx).await, Err(WaitError::Cancelled));
    }

    #[test]
    fn wait_errors_display() {
        assert_eq!(WaitError::Cancelled.to_string(), "wait cancelled");
        assert_eq!(
            WaitError::DeadlineExceeded.to_string(),
            "wait deadline exceeded"
        );
    }
}
