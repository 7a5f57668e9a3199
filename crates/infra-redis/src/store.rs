// Redis ListStore Implementation

use async_trait::async_trait;
use listq_core::domain::ConnectionConfig;
use listq_core::error::{QueueError, Result};
use listq_core::port::{ListStore, PushAck, StoreError};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisError, Value};

use crate::connection::connect;

/// Keys fetched per SCAN round trip
const SCAN_COUNT: u64 = 500;

// Helper to convert RedisError to StoreError, keeping the server message
pub(crate) fn map_redis_error(err: RedisError) -> StoreError {
    StoreError::new(err.to_string())
}

/// Whether a queue error came from a command run against a non-list key
pub fn is_wrong_type(err: &QueueError) -> bool {
    matches!(err, QueueError::Operation(message) if message.starts_with("WRONGTYPE"))
}

/// List store backed by one multiplexed Redis connection
///
/// Cloning shares the underlying connection.
#[derive(Clone)]
pub struct RedisListStore {
    conn: MultiplexedConnection,
}

impl RedisListStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Open a fresh connection for `config`
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        Ok(Self::new(connect(config).await?))
    }

    /// Round-trip check
    pub async fn ping(&self) -> std::result::Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}

fn push_ack(reply: Value) -> PushAck {
    match reply {
        Value::Int(len) => PushAck::Length(len),
        Value::Okay => PushAck::Status("OK".to_string()),
        Value::SimpleString(status) => PushAck::Status(status),
        other => PushAck::Status(format!("{:?}", other)),
    }
}

#[async_trait]
impl ListStore for RedisListStore {
    async fn push_back(&self, key: &str, value: &[u8]) -> std::result::Result<PushAck, StoreError> {
        let mut conn = self.conn.clone();
        let reply: Value = conn.rpush(key, value).await.map_err(map_redis_error)?;
        Ok(push_ack(reply))
    }

    async fn pop_front(&self, key: &str) -> std::result::Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn.clone();
        conn.lpop(key, None).await.map_err(map_redis_error)
    }

    async fn blocking_pop_front(
        &self,
        key: &str,
        timeout_secs: u64,
    ) -> std::result::Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn.clone();
        // BLPOP replies with [key, value], or nil once the wait elapses
        let popped: Option<(String, Vec<u8>)> = redis::cmd("BLPOP")
            .arg(key)
            .arg(timeout_secs)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        Ok(popped.map(|(_, value)| value))
    }

    async fn len(&self, key: &str) -> std::result::Result<u64, StoreError> {
        let mut conn = self.conn.clone();
        conn.llen(key).await.map_err(map_redis_error)
    }

    async fn delete(&self, key: &str) -> std::result::Result<u64, StoreError> {
        let mut conn = self.conn.clone();
        conn.del(key).await.map_err(map_redis_error)
    }

    async fn keys(&self, pattern: &str) -> std::result::Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await
                .map_err(map_redis_error)?;

            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(keys)
    }
}
