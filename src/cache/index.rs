//! Key Index Module
//!
//! Strategies for locating a key's slot in the eviction list.

use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use crate::cache::{Equally, EvictionList, SlotId};

// == Key Index ==
/// Locates entries in an [`EvictionList`] by key.
///
/// Every implementation must confirm a match with [`Equally::equally`].
pub trait KeyIndex<K: Equally>: Default {
    /// Finds the slot holding `key`.
    fn find<V>(&self, key: &K, list: &EvictionList<K, V>) -> Option<SlotId>;

    /// Records that `key` now lives in `slot`.
    fn insert(&mut self, key: &K, slot: SlotId);

    /// Forgets the association between `key` and `slot`.
    fn remove(&mut self, key: &K, slot: SlotId);

    fn clear(&mut self);
}

// == Scan Index ==
/// Linear scan from the most recently used entry. O(n) per lookup, but
/// places no requirement on `K` beyond equality.
#[derive(Debug, Default)]
pub struct ScanIndex;

impl<K: Equally> KeyIndex<K> for ScanIndex {
    fn find<V>(&self, key: &K, list: &EvictionList<K, V>) -> Option<SlotId> {
        list.iter()
            .find(|(_, entry)| entry.key.equally(key))
            .map(|(slot, _)| slot)
    }

    fn insert(&mut self, _key: &K, _slot: SlotId) {}

    fn remove(&mut self, _key: &K, _slot: SlotId) {}

    fn clear(&mut self) {}
}

// == Hash Index ==
/// Buckets of slots keyed by the key's hash.
///
/// Candidates sharing a hash are told apart with `equally`, so the key's
/// `Hash` impl only has to agree with its equality capability.
#[derive(Debug, Default)]
pub struct HashIndex<S = RandomState> {
    buckets: HashMap<u64, Vec<SlotId>>,
    hasher: S,
}

impl<K, S> KeyIndex<K> for HashIndex<S>
where
    K: Equally + Hash,
    S: BuildHasher + Default,
{
    fn find<V>(&self, key: &K, list: &EvictionList<K, V>) -> Option<SlotId> {
        let hash = self.hasher.hash_one(key);
        self.buckets.get(&hash)?.iter().copied().find(|slot| {
            list.get(*slot)
                .is_some_and(|entry| entry.key.equally(key))
        })
    }

    fn insert(&mut self, key: &K, slot: SlotId) {
        let hash = self.hasher.hash_one(key);
        self.buckets.entry(hash).or_default().push(slot);
    }

    fn remove(&mut self, key: &K, slot: SlotId) {
        let hash = self.hasher.hash_one(key);
        if let Some(bucket) = self.buckets.get_mut(&hash) {
            bucket.retain(|s| *s != slot);
            if bucket.is_empty() {
                self.buckets.remove(&hash);
            }
        }
    }

    fn clear(&mut self) {
        self.buckets.clear();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheEntry;
    use std::hash::Hasher;

    /// Every key hashes to the same bucket.
    #[derive(Debug)]
    struct Colliding(u32);

    impl Equally for Colliding {
        fn equally(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    impl Hash for Colliding {
        fn hash<H: Hasher>(&self, state: &mut H) {
            0u8.hash(state);
        }
    }

    #[test]
    fn test_scan_index_finds_by_equality() {
        let mut list = EvictionList::new();
        list.push_front(CacheEntry::new(1u32, "one", None));
        let two = list.push_front(CacheEntry::new(2u32, "two", None));

        let index = ScanIndex;
        assert_eq!(index.find(&2, &list), Some(two));
        assert_eq!(index.find(&3, &list), None);
    }

    #[test]
    fn test_hash_index_tracks_inserts_and_removes() {
        let mut list = EvictionList::new();
        let mut index = HashIndex::<RandomState>::default();

        let slot = list.push_front(CacheEntry::new("a".to_string(), 1, None));
        index.insert(&"a".to_string(), slot);
        assert_eq!(index.find(&"a".to_string(), &list), Some(slot));

        index.remove(&"a".to_string(), slot);
        list.remove(slot);
        assert_eq!(index.find(&"a".to_string(), &list), None);
        assert!(index.buckets.is_empty());
    }

    #[test]
    fn test_hash_index_resolves_collisions_with_equality() {
        let mut list = EvictionList::new();
        let mut index = HashIndex::<RandomState>::default();

        let first = list.push_front(CacheEntry::new(Colliding(1), (), None));
        index.insert(&Colliding(1), first);
        let second = list.push_front(CacheEntry::new(Colliding(2), (), None));
        index.insert(&Colliding(2), second);

        assert_eq!(index.find(&Colliding(1), &list), Some(first));
        assert_eq!(index.find(&Colliding(2), &list), Some(second));
        assert_eq!(index.find(&Colliding(3), &list), None);

        index.remove(&Colliding(1), first);
        assert_eq!(index.find(&Colliding(2), &list), Some(second));
    }
}
