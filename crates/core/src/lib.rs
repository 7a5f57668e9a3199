// listq Core - Queue Semantics & Ports
// NO store client dependencies (adapters live in infra crates)

pub mod application;
pub mod domain;
pub mod error;
pub mod memory;
pub mod port;

pub use application::{Queue, QueueAdmin, ReadMode};
pub use domain::{ConnectionConfig, QueueName};
pub use error::{QueueError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
