//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod index;
mod key;
mod list;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, Expiry, Update};
pub use index::{HashIndex, KeyIndex, ScanIndex};
pub use key::Equally;
pub use list::{EvictionList, Iter, SlotId};
pub use shared::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Cache for keys that can be hashed; lookups are O(1) on average.
///
/// The key's `Hash` must agree with [`Equally`]: keys that are `equally` must
/// hash the same, or duplicate keys can coexist. A case-insensitive `Equally`
/// paired with a derived `Hash` breaks this. Use [`ScanLruCache`] when the two
/// cannot be made to agree.
pub type LruCache<K, V> = Cache<K, V, HashIndex>;

/// Cache for keys that only provide [`Equally`]; lookups scan the recency list.
pub type ScanLruCache<K, V> = Cache<K, V, ScanIndex>;
