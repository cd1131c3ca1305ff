//! Redis-backed record store.
//!
//! Counters map to `INCR`, records to hashes, and indexes to sets, so every
//! trait primitive rides a single Redis command and inherits its atomicity.
//! Connections come from a shared bb8 pool; checkout failures surface as
//! [`StoreError::Unavailable`] and command failures as
//! [`StoreError::Command`].

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection, RunError};
use bb8_redis::redis::{AsyncCommands, RedisError};

use crate::domain::ports::{RecordStore, StoreError};

const DEFAULT_MAX_CONNECTIONS: u32 = 16;
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection pool settings for [`StorePool::connect`].
#[derive(Debug, Clone)]
pub struct StorePoolConfig {
    redis_url: String,
    max_connections: u32,
    connection_timeout: Duration,
}

impl StorePoolConfig {
    /// Settings pointing at `redis_url` with default sizing.
    #[must_use]
    pub fn new(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
        }
    }

    /// Cap the number of pooled connections.
    #[must_use]
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Bound how long a checkout may wait for a free connection.
    #[must_use]
    pub fn with_connection_timeout(mut self, connection_timeout: Duration) -> Self {
        self.connection_timeout = connection_timeout;
        self
    }

    /// Target Redis URL.
    #[must_use]
    #[rustfmt::skip]
    pub fn redis_url(&self) -> &str { &self.redis_url }
}

/// Shared pool of Redis connections.
#[derive(Clone)]
pub struct StorePool {
    pool: Pool<RedisConnectionManager>,
}

impl StorePool {
    /// Build a pool for `config` and verify connectivity.
    pub async fn connect(config: StorePoolConfig) -> Result<Self, StoreError> {
        let manager = RedisConnectionManager::new(config.redis_url.as_str())
            .map_err(|err| StoreError::unavailable(err.to_string()))?;
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| StoreError::unavailable(err.to_string()))?;
        Ok(Self { pool })
    }

    async fn conn(&self) -> Result<PooledConnection<'_, RedisConnectionManager>, StoreError> {
        self.pool.get().await.map_err(|err| match err {
            RunError::User(cause) => StoreError::unavailable(cause.to_string()),
            RunError::TimedOut => StoreError::unavailable("timed out waiting for a connection"),
        })
    }
}

fn command_failed(err: RedisError) -> StoreError {
    StoreError::command(err.to_string())
}

/// [`RecordStore`] implementation over a [`StorePool`].
#[derive(Clone)]
pub struct RedisRecordStore {
    pool: StorePool,
}

impl RedisRecordStore {
    /// Store over an already-connected pool.
    #[must_use]
    pub fn new(pool: StorePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    async fn allocate_counter(&self, name: &str) -> Result<u64, StoreError> {
        let mut conn = self.pool.conn().await?;
        conn.incr(name, 1u64).await.map_err(command_failed)
    }

    async fn put_record(&self, key: &str, fields: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut conn = self.pool.conn().await?;
        let _: () = conn.hset_multiple(key, fields).await.map_err(command_failed)?;
        Ok(())
    }

    async fn get_record(&self, key: &str) -> Result<BTreeMap<String, String>, StoreError> {
        let mut conn = self.pool.conn().await?;
        conn.hgetall(key).await.map_err(command_failed)
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.pool.conn().await?;
        let _: () = conn.hset(key, field, value).await.map_err(command_failed)?;
        Ok(())
    }

    async fn record_exists(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.pool.conn().await?;
        conn.exists(key).await.map_err(command_failed)
    }

    async fn delete_record(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.pool.conn().await?;
        let _: () = conn.del(key).await.map_err(command_failed)?;
        Ok(())
    }

    async fn index_add(&self, index: &str, key: &str) -> Result<(), StoreError> {
        let mut conn = self.pool.conn().await?;
        let _: () = conn.sadd(index, key).await.map_err(command_failed)?;
        Ok(())
    }

    async fn index_remove(&self, index: &str, key: &str) -> Result<(), StoreError> {
        let mut conn = self.pool.conn().await?;
        let _: () = conn.srem(index, key).await.map_err(command_failed)?;
        Ok(())
    }

    async fn index_members(&self, index: &str) -> Result<BTreeSet<String>, StoreError> {
        let mut conn = self.pool.conn().await?;
        conn.smembers(index).await.map_err(command_failed)
    }

    async fn index_size(&self, index: &str) -> Result<u64, StoreError> {
        let mut conn = self.pool.conn().await?;
        conn.scard(index).await.map_err(command_failed)
    }
}
