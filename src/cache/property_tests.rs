//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a simple recency-ordered model.

use proptest::prelude::*;
use std::time::Duration;

use crate::cache::{CacheStore, Expiry, ScanIndex, Update};
use crate::error::CacheError;

// == Strategies ==
/// Small key space so operations collide often
fn key_strategy() -> impl Strategy<Value = u8> {
    0u8..16
}

fn value_strategy() -> impl Strategy<Value = u32> {
    any::<u32>()
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: u8, value: u32 },
    Get { key: u8 },
    Peek { key: u8 },
    Replace { key: u8, value: u32 },
    Update { key: u8, value: u32 },
    Delete { key: u8 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Add { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Peek { key }),
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Replace { key, value }),
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Update { key, value }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

// == Model ==
/// Reference model: most recently used first.
#[derive(Debug, Default)]
struct Model {
    entries: Vec<(u8, u32)>,
    capacity: usize,
}

impl Model {
    fn position(&self, key: u8) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    fn add(&mut self, key: u8, value: u32) -> Result<(), CacheError> {
        if self.position(key).is_some() {
            return Err(CacheError::KeyAlreadyExists);
        }
        if self.capacity > 0 && self.entries.len() == self.capacity {
            self.entries.pop();
        }
        self.entries.insert(0, (key, value));
        Ok(())
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos);
        self.entries.insert(0, entry);
        Some(entry.1)
    }

    fn peek(&self, key: u8) -> Option<u32> {
        self.position(key).map(|pos| self.entries[pos].1)
    }

    fn replace(&mut self, key: u8, value: u32) -> Result<(), CacheError> {
        let pos = self.position(key).ok_or(CacheError::KeyNotFound)?;
        self.entries[pos].1 = value;
        Ok(())
    }

    fn update(&mut self, key: u8, value: u32) -> Result<(), CacheError> {
        let pos = self.position(key).ok_or(CacheError::KeyNotFound)?;
        self.entries.remove(pos);
        self.entries.insert(0, (key, value));
        Ok(())
    }

    fn delete(&mut self, key: u8) -> bool {
        match self.position(key) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }
}

fn check_against_model<I>(capacity: usize, ops: Vec<CacheOp>) -> Result<(), TestCaseError>
where
    I: crate::cache::KeyIndex<u8>,
{
    let mut store: CacheStore<u8, u32, I> = CacheStore::new(capacity, Duration::ZERO);
    let mut model = Model {
        entries: Vec::new(),
        capacity,
    };

    for op in ops {
        match op {
            CacheOp::Add { key, value } => {
                prop_assert_eq!(store.add(key, value, Expiry::Never), model.add(key, value));
            }
            CacheOp::Get { key } => {
                prop_assert_eq!(store.get(&key).copied(), model.get(key));
            }
            CacheOp::Peek { key } => {
                prop_assert_eq!(store.peek(&key).copied(), model.peek(key));
            }
            CacheOp::Replace { key, value } => {
                prop_assert_eq!(store.replace(&key, value), model.replace(key, value));
            }
            CacheOp::Update { key, value } => {
                prop_assert_eq!(
                    store.update_value(&key, Update::Set(value), Update::Keep),
                    model.update(key, value)
                );
            }
            CacheOp::Delete { key } => {
                prop_assert_eq!(store.delete(&key), model.delete(key));
            }
        }

        prop_assert_eq!(store.len(), model.entries.len(), "Length counter drifted");
        if capacity > 0 {
            prop_assert!(store.len() <= capacity, "Cache size {} exceeds {}", store.len(), capacity);
        }
    }

    // Recency order must match the model exactly
    let actual: Vec<(u8, u32)> = store.iter().map(|(k, v)| (*k, *v)).collect();
    prop_assert_eq!(actual, model.entries);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any sequence of operations leaves the hashed store in the model's state.
    #[test]
    fn prop_hash_index_matches_model(
        capacity in 0usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        check_against_model::<crate::cache::HashIndex>(capacity, ops)?;
    }

    // The scanning index is observably identical to the hashed one.
    #[test]
    fn prop_scan_index_matches_model(
        capacity in 0usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        check_against_model::<ScanIndex>(capacity, ops)?;
    }

    // Add(k, v, Never) followed by Get(k) returns v.
    #[test]
    fn prop_roundtrip_storage(key in any::<u64>(), value in ".{0,64}") {
        let mut store: CacheStore<u64, String> = CacheStore::new(0, Duration::ZERO);

        store.add(key, value.clone(), Expiry::Never).unwrap();

        prop_assert_eq!(store.get(&key), Some(&value));
    }

    // A second Add with the same key fails and leaves the first value in place.
    #[test]
    fn prop_no_duplicate_keys(key in key_strategy(), v1 in value_strategy(), v2 in value_strategy()) {
        let mut store: CacheStore<u8, u32> = CacheStore::new(0, Duration::ZERO);

        store.add(key, v1, Expiry::Never).unwrap();
        prop_assert_eq!(store.add(key, v2, Expiry::Default), Err(CacheError::KeyAlreadyExists));
        prop_assert_eq!(store.peek(&key), Some(&v1));
        prop_assert_eq!(store.len(), 1);
    }

    // Out-of-domain lifetimes are rejected without changing the length.
    #[test]
    fn prop_invalid_ttl_rejected(key in key_strategy(), ttl_ms in i64::MIN..-1) {
        let mut store: CacheStore<u8, u32> = CacheStore::new(0, Duration::ZERO);

        let result = Expiry::try_from(ttl_ms).and_then(|ttl| store.add(key, 1, ttl));

        prop_assert_eq!(result, Err(CacheError::InvalidExpiration));
        prop_assert_eq!(store.len(), 0);
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // Entries with a lifetime are swept once it elapses; `Never` entries stay.
    #[test]
    fn prop_ttl_sweep_keeps_only_never(
        keys in prop::collection::hash_set(key_strategy(), 1..10)
    ) {
        let mut store: CacheStore<u8, u32> = CacheStore::new(0, Duration::ZERO);
        let mut survivors = 0;

        for key in &keys {
            let ttl = if key % 2 == 0 {
                survivors += 1;
                Expiry::Never
            } else {
                Expiry::After(Duration::from_millis(5))
            };
            store.add(*key, 0, ttl).unwrap();
        }

        std::thread::sleep(Duration::from_millis(15));

        prop_assert_eq!(store.clear_expired(), keys.len() - survivors);
        prop_assert_eq!(store.len(), survivors);
        prop_assert_eq!(store.clear_expired(), 0);
        prop_assert_eq!(store.len(), survivors);
    }
}
