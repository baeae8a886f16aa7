use redis::{Client, Commands, Connection};

use crate::db::KeyValueStore;
use crate::error::StoreResult;

/// Persistent key-value store backed by Redis
///
/// Uses the blocking command API: every call opens a connection, runs its
/// commands and drops it, matching the synchronous contract of
/// [`KeyValueStore`]. Prefix removal scans and deletes over one connection.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
}

impl RedisStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a store for the Redis server at `redis_url`
    pub fn open(redis_url: &str) -> StoreResult<Self> {
        let client = Client::open(redis_url)?;
        Ok(Self::new(client))
    }

    fn connection(&self) -> StoreResult<Connection> {
        Ok(self.client.get_connection()?)
    }
}

impl KeyValueStore for RedisStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.connection()?;
        let value: Option<String> = conn.get(key)?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.connection()?;
        let _: () = conn.set(key, value)?;
        tracing::debug!(key = %key, bytes = value.len(), "Stored value in Redis");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.connection()?;
        let _: () = conn.del(key)?;
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.connection()?;
        let pattern = format!("{}*", prefix);
        let keys: Vec<String> = conn.scan_match::<_, String>(&pattern)?.collect();
        Ok(keys)
    }

    fn remove_prefix(&self, prefix: &str) -> StoreResult<usize> {
        let mut conn = self.connection()?;
        let pattern = format!("{}*", prefix);
        let keys: Vec<String> = conn.scan_match::<_, String>(&pattern)?.collect();
        if keys.is_empty() {
            return Ok(0);
        }
        let _: () = conn.del(&keys)?;
        tracing::debug!(prefix = %prefix, removed = keys.len(), "Removed keys from Redis");
        Ok(keys.len())
    }
}
