// Queue Use Case - a named list key in the backing store

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::read_mode::{wait_secs, ReadMode};
use crate::domain::QueueName;
use crate::error::{QueueError, Result};
use crate::port::{ListStore, StoreError};

/// A queue bound to one list key
///
/// Holds no state besides the store handle: no buffering, no mirror of the
/// list contents. The handle may be shared with other queues.
#[derive(Clone)]
pub struct Queue {
    name: QueueName,
    store: Arc<dyn ListStore>,
}

impl Queue {
    pub fn new(name: QueueName, store: Arc<dyn ListStore>) -> Self {
        Self { name, store }
    }

    pub fn name(&self) -> &QueueName {
        &self.name
    }

    /// Pop the value at the head of the queue
    ///
    /// Returns `Ok(None)` when the queue is empty (non-blocking) or when the
    /// wait bound elapsed without a value (blocking).
    pub async fn read(&self, mode: ReadMode) -> Result<Option<Vec<u8>>> {
        let key = self.name.as_str();
        let popped = match mode {
            ReadMode::NonBlocking => self.store.pop_front(key).await,
            ReadMode::Blocking(timeout) => {
                let secs = wait_secs(timeout);
                debug!(queue = %self.name, timeout_secs = secs, "Blocking read");
                self.store.blocking_pop_front(key, secs).await
            }
        };

        popped.map_err(|e| self.store_failure("read", e))
    }

    /// Like [`Queue::read`], but an absent value is `QueueError::Empty`
    pub async fn read_required(&self, mode: ReadMode) -> Result<Vec<u8>> {
        self.read(mode).await?.ok_or(QueueError::Empty)
    }

    /// Append a value to the tail of the queue
    ///
    /// Returns whether the store acknowledged the push.
    pub async fn write(&self, value: impl AsRef<[u8]>) -> Result<bool> {
        let ack = self
            .store
            .push_back(self.name.as_str(), value.as_ref())
            .await
            .map_err(|e| self.store_failure("write", e))?;

        let accepted = ack.is_success();
        if !accepted {
            warn!(queue = %self.name, ack = ?ack, "Store did not acknowledge write");
        }
        Ok(accepted)
    }

    /// Current number of values in the queue
    pub async fn len(&self) -> Result<u64> {
        self.store
            .len(self.name.as_str())
            .await
            .map_err(|e| self.store_failure("len", e))
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    fn store_failure(&self, op: &str, err: StoreError) -> QueueError {
        warn!(queue = %self.name, op, error = %err, "Store operation failed");
        err.into()
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Queue {}>", self.name)
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue").field("name", &self.name).finish()
    }
}
