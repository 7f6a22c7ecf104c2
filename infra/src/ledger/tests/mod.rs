#[cfg(feature = "redis-cache")]
mod redis_tests;
