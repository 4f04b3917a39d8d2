//! Bounded LRU cache
//!
//! Composes an AHash index (key → slot) with the arena-backed recency list.
//! After every call `index.len() == list.len() <= capacity`.

use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::list::RecencyList;
use crate::node::SlotId;
use crate::stats::CacheStats;

/// Fixed-capacity key/value store that evicts the least recently used entry
///
/// Both `get` hits and `put` calls count as a use.
#[derive(Debug)]
pub struct RecencyCache<K, V> {
    index: HashMap<K, SlotId, RandomState>,
    list: RecencyList<K, V>,
    capacity: NonZeroUsize,
    stats: CacheStats,
}

impl<K, V> RecencyCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new cache holding at most `capacity` entries
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(Error::InvalidCapacity(capacity))?;
        Ok(Self::with_capacity(capacity))
    }

    /// Create a new cache from an already validated capacity
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        debug!(capacity = capacity.get(), "creating recency cache");

        Self {
            index: HashMap::with_capacity_and_hasher(capacity.get(), RandomState::new()),
            list: RecencyList::with_capacity(capacity.get()),
            capacity,
            stats: CacheStats::new(),
        }
    }

    /// Get a value and mark its key as most recently used
    ///
    /// A miss leaves the recency order untouched.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key) {
            Some(&id) => {
                self.list.move_to_front(id);
                self.stats.record_hit();
                self.list.get(id)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Insert or overwrite a value and mark its key as most recently used
    ///
    /// Inserting a new key into a full cache first evicts the least
    /// recently used entry.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&id) = self.index.get(&key) {
            if let Some(slot) = self.list.get_mut(id) {
                *slot = value;
            }
            self.list.move_to_front(id);
            self.stats.record_update();
            return;
        }

        if self.index.len() >= self.capacity.get() {
            self.evict();
        }

        let id = self.list.push_front(key.clone(), value);
        self.index.insert(key, id);
        self.stats.record_insert();
    }

    /// Get a value without changing its recency
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index.get(key).and_then(|&id| self.list.get(id))
    }

    /// Check for a key without changing its recency
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Remove a key from the cache
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let (_, value) = self.list.take(id)?;
        self.stats.record_removal();
        Some(value)
    }

    /// The entry that the next insert of a new key would evict
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back()
    }

    /// Iterate over entries from most to least recently used
    ///
    /// Does not change the recency order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.list.iter()
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Get the maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset statistics without touching the entries
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Drop every entry (statistics are kept)
    pub fn clear(&mut self) {
        debug!(dropped = self.index.len(), "clearing recency cache");
        self.index.clear();
        self.list.clear();
    }

    fn evict(&mut self) {
        if let Some((key, _)) = self.list.remove_last() {
            self.index.remove(&key);
            self.stats.record_eviction();
            trace!(len = self.index.len(), "evicted least recently used entry");
        }
    }
}
