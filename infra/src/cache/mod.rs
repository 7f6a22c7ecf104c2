//! Redis access shared by the Redis-backed revocation ledger.

pub mod redis_client;


pub use redis_client::RedisClient;
pub use tl_shared::config::CacheConfig;
