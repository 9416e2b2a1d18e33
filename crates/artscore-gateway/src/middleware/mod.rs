//! Request-path middleware.

pub mod rate_limit;

pub use rate_limit::RateLimiter;
