//! Cache Entry Module
//!
//! Defines individual cache entries and the lifetime model they are built from.

use std::time::{Duration, Instant};

use crate::error::CacheError;

// == Expiry ==
/// Lifetime requested for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiry {
    /// Use the cache's default TTL
    #[default]
    Default,
    /// The entry never expires
    Never,
    /// The entry expires after the given duration
    After(Duration),
}

impl Expiry {
    // == Deadline ==
    /// Resolves this lifetime to an absolute deadline.
    ///
    /// `default_ttl` of `None` means the cache's default is "never expires".
    /// Zero durations are rejected rather than read as a sentinel. A deadline
    /// the clock cannot represent resolves to `None`, so the entry never expires.
    pub fn deadline(
        self,
        now: Instant,
        default_ttl: Option<Duration>,
    ) -> Result<Option<Instant>, CacheError> {
        match self {
            Expiry::Never => Ok(None),
            Expiry::Default => Ok(default_ttl.and_then(|ttl| now.checked_add(ttl))),
            Expiry::After(ttl) if ttl.is_zero() => Err(CacheError::InvalidExpiration),
            Expiry::After(ttl) => Ok(now.checked_add(ttl)),
        }
    }
}

/// Interprets a signed millisecond count: `-1` default, `0` never,
/// positive values expire after that many milliseconds.
impl TryFrom<i64> for Expiry {
    type Error = CacheError;

    fn try_from(ttl_ms: i64) -> Result<Self, Self::Error> {
        match ttl_ms {
            -1 => Ok(Expiry::Default),
            0 => Ok(Expiry::Never),
            ms if ms > 0 => Ok(Expiry::After(Duration::from_millis(ms as u64))),
            _ => Err(CacheError::InvalidExpiration),
        }
    }
}

impl From<Duration> for Expiry {
    fn from(ttl: Duration) -> Self {
        Expiry::After(ttl)
    }
}

// == Update ==
/// Either keep the current value of a field or replace it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Update<T> {
    #[default]
    Keep,
    Set(T),
}

impl<T> Update<T> {
    /// Returns the new value, or `current` when the field is kept.
    pub fn apply(self, current: T) -> T {
        match self {
            Update::Keep => current,
            Update::Set(value) => value,
        }
    }
}

// == Cache Entry ==
/// A key, its value and the instant after which it is expired.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    pub key: K,
    pub value: V,
    /// Expiration deadline, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    pub fn new(key: K, value: V, expires_at: Option<Instant>) -> Self {
        Self {
            key,
            value,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now` has passed its deadline; entries
    /// without a deadline never expire.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if no expiration is set.
    ///
    /// Returns `Some(Duration::ZERO)` once the entry has expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
