// Central Error Type for the Queue Adapter

use thiserror::Error;

use crate::port::StoreError;

/// Queue-level error type
///
/// Startup problems surface as [`QueueError::InvalidBackend`]; anything the
/// backing store reports during an operation surfaces as
/// [`QueueError::Operation`] carrying the store's message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Invalid backend: {0}")]
    InvalidBackend(String),

    #[error("Queue error: {0}")]
    Operation(String),

    #[error("Queue is empty")]
    Empty,
}

impl QueueError {
    /// True for failures that can only be fixed by changing configuration
    pub fn is_fatal(&self) -> bool {
        matches!(self, QueueError::InvalidBackend(_))
    }
}

/// Result type alias using QueueError
pub type Result<T> = std::result::Result<T, QueueError>;

impl From<StoreError> for QueueError {
    fn from(err: StoreError) -> Self {
        QueueError::Operation(err.message().to_string())
    }
}
