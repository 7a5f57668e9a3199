// Redis Queue Facade - construct queues and run keyspace operations

use std::sync::Arc;

use listq_core::application::{Queue, QueueAdmin};
use listq_core::domain::{ConnectionConfig, QueueName};
use listq_core::error::Result;
use listq_core::port::ListStore;
use tracing::info;

use crate::settings::RedisSettings;
use crate::store::RedisListStore;

/// Entry point for Redis-backed queues
///
/// Holds only the resolved connection parameters. Every call that needs a
/// store and is not handed one opens a new connection.
#[derive(Debug, Clone)]
pub struct RedisQueues {
    config: ConnectionConfig,
}

impl RedisQueues {
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    pub fn from_settings(settings: &RedisSettings) -> Result<Self> {
        let config = settings.connection_config()?;
        info!(target_url = %config.redacted_url(), "Resolved Redis connection settings");
        Ok(Self::new(config))
    }

    /// Resolve REDIS_URL / QUEUE_REDIS_TIMEOUT from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_settings(&RedisSettings::from_env()?)
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Open a new store handle
    pub async fn connect(&self) -> Result<Arc<dyn ListStore>> {
        Ok(Arc::new(RedisListStore::connect(&self.config).await?))
    }

    /// Queue on a freshly opened connection
    pub async fn open(&self, name: &str) -> Result<Queue> {
        let name = QueueName::new(name)?;
        Ok(Queue::new(name, self.connect().await?))
    }

    /// Queue on a caller-supplied store, which may be shared
    pub fn open_with(&self, name: &str, store: Arc<dyn ListStore>) -> Result<Queue> {
        Ok(Queue::new(QueueName::new(name)?, store))
    }

    /// Admin operations on a freshly opened connection
    pub async fn admin(&self) -> Result<QueueAdmin> {
        Ok(QueueAdmin::new(self.connect().await?))
    }

    /// Lists need no provisioning; the name is still validated first
    pub async fn create_queue(&self, name: &str) -> Result<bool> {
        let name = QueueName::new(name)?;
        Ok(self.admin().await?.create_queue(&name))
    }

    pub async fn delete_queue(&self, name: &str) -> Result<bool> {
        let name = QueueName::new(name)?;
        self.admin().await?.delete_queue(&name).await
    }

    pub async fn list_queue_names(&self) -> Result<Vec<String>> {
        self.admin().await?.list_queue_names().await
    }
}
