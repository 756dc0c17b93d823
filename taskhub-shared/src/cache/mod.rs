/// Key-value cache capability for TaskHub
///
/// The task service treats its cache as a non-authoritative accelerator
/// behind the `KeyValueCache` trait: the relational store is the single
/// source of truth, and a cache that is down degrades reads to the store
/// instead of failing requests.
///
/// # Backends
///
/// - `redis`: production backend over redis::aio::ConnectionManager
/// - `memory`: in-process backend for tests
///
/// # Example
///
/// ```
/// use taskhub_shared::cache::{KeyValueCache, MemoryCache};
///
/// # async fn example() -> anyhow::Result<()> {
/// let cache = MemoryCache::new();
/// cache.set_ex("task:1-2", "{}", 300).await?;
/// assert_eq!(cache.get("task:1-2").await?, Some("{}".to_string()));
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod redis;

pub use memory::MemoryCache;
pub use redis::{RedisCache, RedisConfig};

use async_trait::async_trait;

/// Cache backend errors
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Connection error
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    /// Command execution error
    #[error("Cache command error: {0}")]
    CommandError(String),

    /// Configuration error
    #[error("Cache configuration error: {0}")]
    ConfigError(String),
}

/// Capability trait for a string key-value cache with expiring entries
///
/// Implementations must be cheap to clone behind an Arc and safe to call
/// from concurrent request handlers.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Gets the value for a key, or None if absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Sets a key to a value with a TTL in seconds
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError>;

    /// Deletes a key; deleting an absent key is not an error
    async fn del(&self, key: &str) -> Result<(), CacheError>;
}
