// listq Infrastructure - Redis Adapter
// Implements: ListStore over Redis lists, plus settings and connection setup

mod connection;
mod queues;
mod settings;
mod store;

pub use connection::{client_for, connect};
pub use queues::RedisQueues;
pub use settings::{RedisSettings, REDIS_URL_KEY, TIMEOUT_KEY};
pub use store::{is_wrong_type, RedisListStore};

// Note: redis::RedisError conversion is handled by map_redis_error in store.rs
// due to Rust's orphan rules (cannot implement From<RedisError> for StoreError here)
