//! LRU TTL Cache - A generic, thread-safe in-process cache
//!
//! Provides least-recently-used eviction, per-entry TTL expiration and a
//! background sweeper, plus a small concurrent dedup set.

pub mod cache;
pub mod config;
pub mod dedup;
pub mod error;
pub mod tasks;

pub use cache::{Cache, Equally, Expiry, LruCache, ScanLruCache, Update};
pub use config::CacheConfig;
pub use dedup::DedupSet;
pub use error::{CacheError, Result};
