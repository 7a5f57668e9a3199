// Domain Layer - Connection parameters and queue identity

pub mod connection;
pub mod queue;

// Re-exports
pub use connection::{ConnectionConfig, DEFAULT_PORT};
pub use queue::QueueName;
