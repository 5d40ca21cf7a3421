//! Cache module for Redis-backed session state
//!
//! Each caller session is one Redis hash; the throttle counters, lockout
//! timestamp, pending identifier and signup flag are fields of that hash.

pub mod redis_client;
pub mod session_store;


pub use redis_client::RedisClient;
pub use session_store::{session_key, RedisSessionStore};

// Re-export commonly used types
pub use og_shared::config::CacheConfig;
