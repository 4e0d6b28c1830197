// tests/ratelimiter/main.rs

mod error_tests;
