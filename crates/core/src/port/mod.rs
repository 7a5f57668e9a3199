// Port Layer - Interfaces for external dependencies

pub mod list_store;

// Re-exports
pub use list_store::{ListStore, PushAck, StoreError};

#[cfg(test)]
pub use list_store::MockListStore;
