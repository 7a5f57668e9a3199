// List Store Port (Interface)
//
// The primitives a backing store must offer for a queue to be mapped onto
// one of its list-valued keys.

use async_trait::async_trait;
use thiserror::Error;

/// Error reported by the backing store
///
/// Carries the store's own message; the queue layer turns it into
/// `QueueError::Operation`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Acknowledgement returned by a push
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushAck {
    /// Status reply (e.g. "OK")
    Status(String),
    /// Length of the list after the push
    Length(i64),
}

impl PushAck {
    /// Whether the store acknowledged the push as successful
    pub fn is_success(&self) -> bool {
        match self {
            PushAck::Status(status) => status.eq_ignore_ascii_case("OK"),
            PushAck::Length(len) => *len > 0,
        }
    }
}

/// Store interface for list-valued keys
///
/// Every method is a single round trip to the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Append a value to the tail of the list at `key`
    async fn push_back(&self, key: &str, value: &[u8]) -> Result<PushAck, StoreError>;

    /// Pop from the head of the list; `None` when the list is empty
    async fn pop_front(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Pop from the head, waiting up to `timeout_secs` whole seconds for a
    /// value (0 waits indefinitely); `None` when the wait elapsed
    async fn blocking_pop_front(
        &self,
        key: &str,
        timeout_secs: u64,
    ) -> Result<Option<Vec<u8>>, StoreError>;

    /// Length of the list (0 when the key does not exist)
    async fn len(&self, key: &str) -> Result<u64, StoreError>;

    /// Delete the key outright; returns the number of keys removed
    async fn delete(&self, key: &str) -> Result<u64, StoreError>;

    /// All keys matching a glob-style pattern
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError>;
}
