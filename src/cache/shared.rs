//! Shared Cache Module
//!
//! Thread-safe cache handle combining a locked [`CacheStore`] with its sweeper.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::cache::{CacheStats, CacheStore, Equally, Expiry, HashIndex, KeyIndex, Update};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::{spawn_sweeper, Sweeper};

// == Cache ==
/// Thread-safe LRU cache with per-entry TTL.
///
/// Reads that leave recency order alone (`peek`, `is_exist`, `len`, `stats`)
/// share the lock; everything else takes it exclusively, so promotions are
/// serialized. Wrap in an `Arc` to share between threads or tasks.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use lru_ttl_cache::cache::{Cache, Expiry};
///
/// let cache: Cache<String, u32> = Cache::new(2, Duration::ZERO, Duration::ZERO).unwrap();
/// cache.add("a".to_string(), 1, Expiry::Never).unwrap();
/// assert_eq!(cache.get(&"a".to_string()), Some(1));
/// ```
#[derive(Debug)]
pub struct Cache<K, V, I = HashIndex> {
    store: Arc<RwLock<CacheStore<K, V, I>>>,
    /// Present when a cleanup interval was configured
    sweeper: Option<Sweeper>,
}

impl<K, V, I> Cache<K, V, I>
where
    K: Equally + Send + Sync + 'static,
    V: Send + Sync + 'static,
    I: KeyIndex<K> + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache and, if `cleanup_interval` is non-zero, starts its sweeper.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, 0 for unbounded
    /// * `default_ttl` - Lifetime for `Expiry::Default`, zero for never
    /// * `cleanup_interval` - Sweep period, zero disables the sweeper
    ///
    /// # Errors
    /// `CacheError::NoRuntime` if a sweeper is requested outside a tokio runtime.
    pub fn new(capacity: usize, default_ttl: Duration, cleanup_interval: Duration) -> Result<Self> {
        let store = Arc::new(RwLock::new(CacheStore::new(capacity, default_ttl)));

        let sweeper = if cleanup_interval.is_zero() {
            None
        } else {
            Some(spawn_sweeper(Arc::downgrade(&store), cleanup_interval)?)
        };

        Ok(Self { store, sweeper })
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.capacity, config.default_ttl(), config.cleanup_interval())
    }

    // == Writes ==
    /// Adds a new entry; see [`CacheStore::add`].
    pub fn add(&self, key: K, value: V, ttl: Expiry) -> Result<()> {
        self.store.write().add(key, value, ttl)
    }

    /// Adds a new entry with a signed millisecond lifetime:
    /// `-1` default, `0` never, positive expires after that many milliseconds.
    pub fn add_millis(&self, key: K, value: V, ttl_ms: i64) -> Result<()> {
        self.add(key, value, Expiry::try_from(ttl_ms)?)
    }

    pub fn replace(&self, key: &K, value: V) -> Result<()> {
        self.store.write().replace(key, value)
    }

    pub fn update_value(&self, key: &K, value: Update<V>, ttl: Update<Expiry>) -> Result<()> {
        self.store.write().update_value(key, value, ttl)
    }

    pub fn delete(&self, key: &K) -> bool {
        self.store.write().delete(key)
    }

    /// Removes expired entries now, returning how many were removed.
    pub fn clear_expired_data(&self) -> usize {
        self.store.write().clear_expired()
    }

    pub fn clear(&self) {
        self.store.write().clear();
    }

    // == Reads ==
    /// Returns a copy of the value and promotes the entry.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.store.write().get(key).cloned()
    }

    /// Returns a copy of the value without changing recency order.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.store.read().peek(key).cloned()
    }

    /// Runs `f` on the value without cloning it or changing recency order.
    pub fn peek_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.store.read().peek(key).map(f)
    }

    pub fn is_exist(&self, key: &K) -> bool {
        self.store.read().is_exist(key)
    }

    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    pub fn cap(&self) -> usize {
        self.store.read().cap()
    }

    pub fn stats(&self) -> CacheStats {
        self.store.read().stats()
    }

    // == Lifecycle ==
    /// Whether a background sweeper task is running.
    pub fn has_sweeper(&self) -> bool {
        self.sweeper.as_ref().is_some_and(|sweeper| !sweeper.is_finished())
    }

    /// Stops the sweeper, if any, and waits for it to exit.
    ///
    /// The cache stays usable; expired entries are then only reclaimed by
    /// lookups and explicit `clear_expired_data` calls.
    pub async fn shutdown(&mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.shutdown().await;
        }
    }
}
