//! Eviction List Module
//!
//! Recency-ordered list of cache entries, stored in an arena of slots.

use crate::cache::CacheEntry;

// == Slot Id ==
/// Stable handle to an entry in the eviction list.
///
/// A slot id stays valid until its entry is removed; the slot may then be
/// reused by a later insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

#[derive(Debug)]
struct Node<K, V> {
    entry: Option<CacheEntry<K, V>>,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Eviction List ==
/// Doubly linked list of entries addressed by index.
///
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug)]
pub struct EvictionList<K, V> {
    nodes: Vec<Node<K, V>>,
    /// Vacant slots available for reuse
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> Default for EvictionList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> EvictionList<K, V> {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an entry as the most recently used one.
    pub fn push_front(&mut self, entry: CacheEntry<K, V>) -> SlotId {
        let node = Node {
            entry: Some(entry),
            prev: None,
            next: self.head,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        match self.head {
            Some(old_head) => self.nodes[old_head].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;

        SlotId(idx)
    }

    // == Remove ==
    /// Unlinks an entry and returns it.
    ///
    /// Returns None if the slot is vacant.
    pub fn remove(&mut self, slot: SlotId) -> Option<CacheEntry<K, V>> {
        let entry = self.nodes.get_mut(slot.0)?.entry.take()?;
        self.unlink(slot.0);
        self.free.push(slot.0);
        self.len -= 1;
        Some(entry)
    }

    // == Touch ==
    /// Marks an entry as recently used (moves it to the front).
    pub fn touch(&mut self, slot: SlotId) {
        if self.get(slot).is_none() || self.head == Some(slot.0) {
            return;
        }

        self.unlink(slot.0);

        let idx = slot.0;
        self.nodes[idx].next = self.head;
        if let Some(old_head) = self.head {
            self.nodes[old_head].prev = Some(idx);
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used entry.
    pub fn evict_oldest(&mut self) -> Option<CacheEntry<K, V>> {
        let tail = self.tail?;
        self.remove(SlotId(tail))
    }

    // == Peek Oldest ==
    /// Returns the least recently used slot without removing it.
    pub fn peek_oldest(&self) -> Option<SlotId> {
        self.tail.map(SlotId)
    }

    // == Accessors ==
    pub fn get(&self, slot: SlotId) -> Option<&CacheEntry<K, V>> {
        self.nodes.get(slot.0)?.entry.as_ref()
    }

    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut CacheEntry<K, V>> {
        self.nodes.get_mut(slot.0)?.entry.as_mut()
    }

    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = &mut self.nodes[idx];
            (node.prev.take(), node.next.take())
        };

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
    }
}

// == Iterator ==
pub struct Iter<'a, K, V> {
    list: &'a EvictionList<K, V>,
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (SlotId, &'a CacheEntry<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = &self.list.nodes[idx];
        self.cursor = node.next;
        node.entry.as_ref().map(|entry| (SlotId(idx), entry))
    }
}
