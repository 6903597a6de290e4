//! Cache Store Module
//!
//! Main cache engine combining the eviction list with a key index and TTL expiration.
//! The store itself is not synchronized; see [`Cache`](crate::cache::Cache) for the
//! thread-safe handle.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{
    CacheEntry, CacheStats, Equally, EvictionList, Expiry, HashIndex, KeyIndex, SlotId, Update,
};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Cache storage with LRU eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore<K, V, I = HashIndex> {
    /// Entries ordered by recency
    list: EvictionList<K, V>,
    /// Key to slot lookup
    index: I,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries, 0 = unbounded
    capacity: usize,
    /// TTL for entries added with `Expiry::Default`, None = never expire
    default_ttl: Option<Duration>,
}

impl<K, V, I> CacheStore<K, V, I>
where
    K: Equally,
    I: KeyIndex<K>,
{
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, 0 for unbounded
    /// * `default_ttl` - Lifetime of entries added with `Expiry::Default`;
    ///   `Duration::ZERO` means they never expire
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        Self {
            list: EvictionList::new(),
            index: I::default(),
            stats: CacheStats::new(),
            capacity,
            default_ttl: (!default_ttl.is_zero()).then_some(default_ttl),
        }
    }

    // == Add ==
    /// Inserts a new entry at the front of the recency list.
    ///
    /// Fails with `InvalidExpiration` before touching the cache if `ttl` is
    /// out of domain, and with `KeyAlreadyExists` if a live entry with an
    /// equal key is present. If the cache is at capacity, the least recently
    /// used entry is evicted first.
    pub fn add(&mut self, key: K, value: V, ttl: Expiry) -> Result<()> {
        let now = Instant::now();
        let expires_at = ttl.deadline(now, self.default_ttl)?;

        if self.locate(&key, now).is_some() {
            return Err(CacheError::KeyAlreadyExists);
        }

        if self.capacity > 0 && self.list.len() >= self.capacity {
            self.evict_oldest();
        }

        let slot = self.list.push_front(CacheEntry::new(key, value, expires_at));
        if let Some(entry) = self.list.get(slot) {
            self.index.insert(&entry.key, slot);
        }

        Ok(())
    }

    // == Get ==
    /// Retrieves a value and promotes its entry to most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.locate(key, Instant::now()) {
            Some(slot) => {
                trace!("cache hit");
                self.stats.record_hit();
                self.list.touch(slot);
                self.list.get(slot).map(|entry| &entry.value)
            }
            None => {
                trace!("cache miss");
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Retrieves a value without changing recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let slot = self.find_live(key, Instant::now())?;
        self.list.get(slot).map(|entry| &entry.value)
    }

    // == Is Exist ==
    /// Checks whether a live entry exists, without changing recency order.
    pub fn is_exist(&self, key: &K) -> bool {
        self.find_live(key, Instant::now()).is_some()
    }

    // == Replace ==
    /// Overwrites a value in place, keeping its expiration and list position.
    pub fn replace(&mut self, key: &K, value: V) -> Result<()> {
        let slot = self
            .locate(key, Instant::now())
            .ok_or(CacheError::KeyNotFound)?;

        if let Some(entry) = self.list.get_mut(slot) {
            entry.value = value;
        }
        Ok(())
    }

    // == Update Value ==
    /// Updates the value and/or lifetime of an entry and promotes it.
    ///
    /// The new lifetime is measured from now. `Update::Keep` leaves the
    /// corresponding field untouched.
    pub fn update_value(&mut self, key: &K, value: Update<V>, ttl: Update<Expiry>) -> Result<()> {
        let now = Instant::now();
        let slot = self.locate(key, now).ok_or(CacheError::KeyNotFound)?;

        let expires_at = match ttl {
            Update::Keep => Update::Keep,
            Update::Set(expiry) => Update::Set(expiry.deadline(now, self.default_ttl)?),
        };

        if let Some(entry) = self.list.get_mut(slot) {
            if let Update::Set(value) = value {
                entry.value = value;
            }
            entry.expires_at = expires_at.apply(entry.expires_at);
            trace!(
                ttl_remaining_ms = entry.ttl_remaining().map(|ttl| ttl.as_millis() as u64),
                "Cache entry updated"
            );
        }
        self.list.touch(slot);

        Ok(())
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether a live entry was removed.
    pub fn delete(&mut self, key: &K) -> bool {
        match self.locate(key, Instant::now()) {
            Some(slot) => {
                self.remove_slot(slot);
                true
            }
            None => false,
        }
    }

    // == Clear Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn clear_expired(&mut self) -> usize {
        if self.list.is_empty() {
            return 0;
        }

        let now = Instant::now();
        let expired: Vec<SlotId> = self
            .list
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(slot, _)| slot)
            .collect();

        let count = expired.len();
        for slot in expired {
            self.remove_slot(slot);
        }

        self.stats.record_expirations(count);
        count
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.list.len();
        stats
    }

    /// Iterates over entries from most to least recently used, expired ones included.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|(_, entry)| (&entry.key, &entry.value))
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Configured capacity, 0 = unbounded.
    pub fn cap(&self) -> usize {
        self.capacity
    }

    /// Finds a key's slot, reclaiming the entry if it has expired.
    fn locate(&mut self, key: &K, now: Instant) -> Option<SlotId> {
        let slot = self.index.find(key, &self.list)?;
        let expired = self
            .list
            .get(slot)
            .is_some_and(|entry| entry.is_expired_at(now));

        if expired {
            debug!("reclaiming expired entry on lookup");
            self.remove_slot(slot);
            self.stats.record_expirations(1);
            return None;
        }
        Some(slot)
    }

    fn find_live(&self, key: &K, now: Instant) -> Option<SlotId> {
        self.index
            .find(key, &self.list)
            .filter(|slot| self.list.get(*slot).is_some_and(|e| !e.is_expired_at(now)))
    }

    fn evict_oldest(&mut self) {
        if let Some(slot) = self.list.peek_oldest() {
            self.remove_slot(slot);
            self.stats.record_eviction();
            debug!(capacity = self.capacity, "evicted least recently used entry");
        }
    }

    fn remove_slot(&mut self, slot: SlotId) -> Option<CacheEntry<K, V>> {
        let entry = self.list.remove(slot)?;
        self.index.remove(&entry.key, slot);
        Some(entry)
    }
}
