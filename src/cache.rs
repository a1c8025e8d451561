use crate::error::{AppError, AppResult};
use crate::models::LinkRecord;
use deadpool_redis::{redis::AsyncCommands, Manager, Pool, Runtime};
use serde_json;
use std::time::Duration;

/// Cache layer for redirect lookups.
///
/// Only active links are ever written here; deactivation and click
/// accounting both invalidate the entry.
#[derive(Clone)]
pub struct Cache {
    pool: Pool,
    default_ttl: Duration,
}

impl Cache {
    /// Create a new cache connection pool
    pub async fn new(
        redis_url: &str,
        max_connections: u32,
        default_ttl_seconds: u64,
    ) -> AppResult<Self> {
        let manager = Manager::new(redis_url)
            .map_err(|e| AppError::Configuration(format!("Invalid Redis URL: {}", e)))?;

        let pool = Pool::builder(manager)
            .max_size(max_connections as usize)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create Redis pool: {}", e)))?;

        Ok(Self {
            pool,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        })
    }

    /// Ping the Redis server to check connectivity
    pub async fn ping(&self) -> AppResult<String> {
        let mut conn = self.pool.get().await?;
        let response: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(response)
    }

    /// Get a link from cache by public key
    pub async fn get_link(&self, key: &str) -> AppResult<Option<LinkRecord>> {
        let cache_key = Self::link_key(key);
        let mut conn = self.pool.get().await?;

        let value: Option<String> = conn.get(&cache_key).await?;

        match value {
            Some(v) => {
                let record: LinkRecord = serde_json::from_str(&v).map_err(|e| {
                    AppError::Internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Set a link in cache. Inactive links are skipped so a stale entry
    /// can never resurrect a deactivated redirect.
    pub async fn set_link(&self, record: &LinkRecord) -> AppResult<()> {
        if !record.is_active {
            return Ok(());
        }

        let cache_key = Self::link_key(&record.key);
        let value = serde_json::to_string(record)?;
        let mut conn = self.pool.get().await?;

        let _: () = conn
            .set_ex(&cache_key, value, self.default_ttl.as_secs())
            .await?;

        Ok(())
    }

    /// Delete a link from cache
    pub async fn delete_link(&self, key: &str) -> AppResult<()> {
        let cache_key = Self::link_key(key);
        let mut conn = self.pool.get().await?;

        let _: () = conn.del(&cache_key).await?;

        Ok(())
    }

    /// Generate cache key for a link
    fn link_key(key: &str) -> String {
        format!("{}:{}", Self::KEY_PREFIX, key)
    }

    const KEY_PREFIX: &'static str = "link";
}
