//! Dedup Set Module
//!
//! Concurrent "have I seen this string before" set. Entries are never
//! removed and never expire.

use std::collections::HashSet;

use parking_lot::Mutex;

// == Dedup Set ==
#[derive(Debug, Default)]
pub struct DedupSet {
    seen: Mutex<HashSet<String>>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set with room for `capacity` strings before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: Mutex::new(HashSet::with_capacity(capacity)),
        }
    }

    // == Is Exist ==
    /// Returns whether `s` was already present, inserting it if it was not.
    ///
    /// The check and the insert happen under one lock, so exactly one of any
    /// number of concurrent callers with the same string sees `false`.
    pub fn is_exist(&self, s: &str) -> bool {
        let mut seen = self.seen.lock();
        if seen.contains(s) {
            return true;
        }
        seen.insert(s.to_owned());
        false
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }
}
