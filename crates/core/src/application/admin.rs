// Queue Administration - provisioning, deletion and listing

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::QueueName;
use crate::error::Result;
use crate::port::ListStore;

/// Pattern matching every key in the store
pub const ALL_KEYS: &str = "*";

/// Keyspace-level operations shared by every queue on a store
pub struct QueueAdmin {
    store: Arc<dyn ListStore>,
}

impl QueueAdmin {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self { store }
    }

    /// Lists need no provisioning; kept so backends share one call
    pub fn create_queue(&self, name: &QueueName) -> bool {
        debug!(queue = %name, "create_queue is a no-op for list stores");
        true
    }

    /// Delete the whole list
    ///
    /// Returns `true` only if exactly one key was removed.
    pub async fn delete_queue(&self, name: &QueueName) -> Result<bool> {
        let removed = self.store.delete(name.as_str()).await?;
        info!(queue = %name, removed, "Deleted queue");
        Ok(removed == 1)
    }

    /// Every key in the store
    ///
    /// This is the whole keyspace, not only keys written through a queue;
    /// callers sharing the store with other data should namespace their
    /// queue names and use [`QueueAdmin::list_queue_names_matching`].
    pub async fn list_queue_names(&self) -> Result<Vec<String>> {
        self.list_queue_names_matching(ALL_KEYS).await
    }

    /// Keys matching a glob-style pattern, sorted
    pub async fn list_queue_names_matching(&self, pattern: &str) -> Result<Vec<String>> {
        let mut names = self.store.keys(pattern).await?;
        names.sort();
        names.dedup();
        Ok(names)
    }
}
