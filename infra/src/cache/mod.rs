//! Cache-backed store implementations.

pub mod memory;
pub mod redis_client;
pub mod registration_cache;

pub use memory::{InMemoryAttemptStore, InMemoryOtpStore, InMemoryRegistrationCache};
pub use redis_client::RedisClient;
pub use registration_cache::RedisRegistrationCache;
