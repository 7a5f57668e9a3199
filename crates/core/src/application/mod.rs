// Application Layer - Queue use cases over the ListStore port

pub mod admin;
pub mod queue;
pub mod read_mode;

// Re-exports
pub use admin::QueueAdmin;
pub use queue::Queue;
pub use read_mode::ReadMode;
