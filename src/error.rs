//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// Lookup misses are not errors; `get`, `peek` and `is_exist` report absence
/// through `Option`/`bool`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// `add` was called with a key that is already present
    #[error("key already exists")]
    KeyAlreadyExists,

    /// `replace` or `update_value` was called with an absent key
    #[error("key does not exist")]
    KeyNotFound,

    /// The requested lifetime is outside the accepted domain
    #[error("invalid expiration")]
    InvalidExpiration,

    /// A sweeper was requested but no tokio runtime is running
    #[error("background sweeper requires a running tokio runtime")]
    NoRuntime,
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
