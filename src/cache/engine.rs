//! LRU Cache Engine
//!
//! Fixed-capacity key-value cache combining a hash index with an arena-backed
//! recency list. Every operation is O(1) (expected, for the hash lookups).

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::cache::entry::Handle;
use crate::cache::lru::{Iter, RecencyList};
use crate::error::{CacheError, Result};

// == Public Constants ==
/// Capacity used by `LruCache::default()`
pub const DEFAULT_CAPACITY: usize = 32;

/// Upper bound on up-front allocation; larger caches grow on demand.
const MAX_PREALLOC: usize = 1024;

// == LRU Cache ==
/// A generic least-recently-used cache.
///
/// Holds at most `capacity` entries. Reads through [`get`](Self::get) and
/// writes through [`push`](Self::push) mark an entry as most recently used;
/// inserting a new key into a full cache evicts the least recently used one.
///
/// Membership tests ([`contains`](Self::contains)), [`peek`](Self::peek) and
/// iteration leave recency untouched.
///
/// The cache does no locking. Share it across threads behind a mutex.
///
/// ```
/// use laroux::cache::LruCache;
///
/// let mut cache = LruCache::new(2).unwrap();
/// cache.push("a", 1);
/// cache.push("b", 2);
/// assert_eq!(cache.get("a"), Some(&1));
///
/// // "b" is now least recently used
/// assert_eq!(cache.push("c", 3), Some(("b", 2)));
/// assert!(!cache.contains("b"));
/// ```
#[derive(Clone)]
pub struct LruCache<K, V> {
    /// Key -> position in `order`
    index: HashMap<K, Handle>,
    /// Entries from most to least recently used
    order: RecencyList<K, V>,
    /// Maximum number of entries, always >= 1
    capacity: usize,
}

impl<K, V> LruCache<K, V> {
    // == Accessors ==
    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Recency Ends ==
    /// Returns the most recently used pair without touching it.
    pub fn most_recent(&self) -> Option<(&K, &V)> {
        self.order.peek_newest().map(|e| (&e.key, &e.value))
    }

    /// Returns the next eviction candidate without touching it.
    pub fn least_recent(&self) -> Option<(&K, &V)> {
        self.order.peek_oldest().map(|e| (&e.key, &e.value))
    }

    // == Iteration ==
    /// Iterates over all pairs from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.order.iter()
    }

    /// Iterates over keys from most to least recently used.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over values from most to least recently used.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self::with_valid_capacity(capacity))
    }

    fn with_valid_capacity(capacity: usize) -> Self {
        let prealloc = capacity.min(MAX_PREALLOC);
        Self {
            index: HashMap::with_capacity(prealloc),
            order: RecencyList::with_capacity(prealloc),
            capacity,
        }
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss returns `None` and changes nothing.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        self.order.touch(handle);
        self.order.get(handle).map(|e| &e.value)
    }

    /// Mutable variant of [`get`](Self::get); also marks the entry as used.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        self.order.touch(handle);
        self.order.get_mut(handle).map(|e| &mut e.value)
    }

    // == Peek ==
    /// Returns the value for `key` without changing recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        self.order.get(handle).map(|e| &e.value)
    }

    // == Contains ==
    /// Checks membership. Does not count as an access.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Push ==
    /// Inserts or updates `key` and marks it most recently used.
    ///
    /// Updating an existing key replaces its value in place and never evicts.
    /// Inserting a new key into a full cache evicts the least recently used
    /// entry, which is returned. The key being pushed is never the one evicted.
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&handle) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(handle) {
                entry.value = value;
            }
            self.order.touch(handle);
            return None;
        }

        let handle = self.order.push_front(key.clone(), value);
        self.index.insert(key, handle);

        if self.order.len() > self.capacity {
            self.evict_one()
        } else {
            None
        }
    }

    // == Remove ==
    /// Removes `key`, returning its value if it was cached.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.remove(key)?;
        self.order.remove(handle).map(|e| e.value)
    }

    // == Resize ==
    /// Changes the capacity, evicting least recently used entries as needed.
    ///
    /// Evicted pairs are returned oldest first. A zero capacity is rejected
    /// and leaves the cache untouched.
    pub fn resize(&mut self, capacity: usize) -> Result<Vec<(K, V)>> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        self.capacity = capacity;
        let mut evicted = Vec::with_capacity(self.len().saturating_sub(capacity));
        while self.len() > self.capacity {
            match self.evict_one() {
                Some(pair) => evicted.push(pair),
                None => break,
            }
        }
        Ok(evicted)
    }

    // == Clear ==
    /// Drops every entry. Capacity is kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    // == Evict One ==
    fn evict_one(&mut self) -> Option<(K, V)> {
        let (key, value) = self.order.evict_oldest()?;
        self.index.remove(&key);
        Some((key, value))
    }

    // == Invariant Check ==
    /// Panics if the index and the recency list disagree.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert!(self.capacity >= 1, "capacity dropped below 1");
        assert_eq!(self.index.len(), self.order.len(), "index/order size mismatch");
        assert!(self.len() <= self.capacity, "size exceeds capacity");

        for (key, &handle) in &self.index {
            let entry = self.order.get(handle).expect("index points at empty slot");
            assert!(entry.key == *key, "index points at wrong entry");
        }

        let forward: Vec<&K> = self.iter().map(|(k, _)| k).collect();
        let mut backward: Vec<&K> = self.iter().rev().map(|(k, _)| k).collect();
        backward.reverse();
        assert_eq!(forward.len(), self.len(), "recency list length mismatch");
        assert!(forward == backward, "prev/next links disagree");
        assert!(
            forward.iter().all(|k| self.index.contains_key(*k)),
            "orphan entry in recency list"
        );
    }
}

// == Default ==
impl<K, V> Default for LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates an empty cache with `DEFAULT_CAPACITY` (32) entries.
    fn default() -> Self {
        Self::with_valid_capacity(DEFAULT_CAPACITY)
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// == Formatting ==
impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Lists values from most to least recently used, e.g. `[3, 1, 2]`.
impl<K, V: fmt::Display> fmt::Display for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys<V>(cache: &LruCache<&'static str, V>) -> Vec<&'static str> {
        cache.keys().copied().collect()
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        let result = LruCache::<String, u32>::new(0);
        assert_eq!(result.err(), Some(CacheError::InvalidCapacity(0)));
    }

    #[test]
    fn test_default_capacity() {
        let cache: LruCache<String, u32> = LruCache::default();
        assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
        assert_eq!(cache.capacity(), 32);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let cache: LruCache<u64, u64> = LruCache::new(usize::MAX).unwrap();
        assert_eq!(cache.capacity(), usize::MAX);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_push_and_get() {
        let mut cache = LruCache::new(2).unwrap();

        cache.push(1, "a");
        cache.push(2, "b");

        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.len(), 2);
        cache.check_invariants();
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut cache = LruCache::new(2).unwrap();

        cache.push("a", 1);
        cache.push("b", 2);
        let evicted = cache.push("c", 3);

        assert_eq!(evicted, Some(("a", 1)));
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(&2));
        assert_eq!(cache.get("c"), Some(&3));
        cache.check_invariants();
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = LruCache::new(2).unwrap();

        cache.push("a", 1);
        cache.push("b", 2);
        assert_eq!(cache.get("a"), Some(&1));
        cache.push("c", 3);

        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some(&1));
        assert_eq!(cache.get("c"), Some(&3));
        cache.check_invariants();
    }

    #[test]
    fn test_push_existing_updates_in_place() {
        let mut cache = LruCache::new(2).unwrap();

        cache.push("a", 1);
        cache.push("b", 2);
        let evicted = cache.push("a", 10);

        assert!(evicted.is_none());
        assert_eq!(cache.len(), 2);
        assert_eq!(keys(&cache), vec!["a", "b"]);
        assert_eq!(cache.peek("a"), Some(&10));

        // "b" is now the eviction candidate
        assert_eq!(cache.push("c", 3), Some(("b", 2)));
        cache.check_invariants();
    }

    #[test]
    fn test_capacity_one() {
        let mut cache = LruCache::new(1).unwrap();

        assert!(cache.push("a", 1).is_none());
        assert_eq!(cache.push("b", 2), Some(("a", 1)));
        assert_eq!(cache.push("c", 3), Some(("b", 2)));
        assert!(cache.push("c", 4).is_none());

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("c"), Some(&4));
        cache.check_invariants();
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut cache = LruCache::new(3).unwrap();

        cache.push("a", 1);
        cache.push("b", 2);
        let before = keys(&cache);

        assert_eq!(cache.get("missing"), None);
        assert_eq!(cache.get_mut("missing"), None);

        assert_eq!(cache.len(), 2);
        assert_eq!(keys(&cache), before);
    }

    #[test]
    fn test_contains_does_not_refresh_recency() {
        let mut cache = LruCache::new(2).unwrap();

        cache.push("a", 1);
        cache.push("b", 2);
        assert!(cache.contains("a"));
        assert!(!cache.contains("z"));

        // "a" is still least recently used
        assert_eq!(cache.push("c", 3), Some(("a", 1)));
        assert!(!cache.contains("a"));
    }

    #[test]
    fn test_peek_does_not_refresh_recency() {
        let mut cache = LruCache::new(2).unwrap();

        cache.push("a", 1);
        cache.push("b", 2);
        assert_eq!(cache.peek("a"), Some(&1));

        assert_eq!(cache.push("c", 3), Some(("a", 1)));
    }

    #[test]
    fn test_get_mut_refreshes_and_mutates() {
        let mut cache = LruCache::new(2).unwrap();

        cache.push("a", 1);
        cache.push("b", 2);
        if let Some(value) = cache.get_mut("a") {
            *value += 100;
        }

        assert_eq!(cache.push("c", 3), Some(("b", 2)));
        assert_eq!(cache.peek("a"), Some(&101));
    }

    #[test]
    fn test_optional_values_are_unambiguous() {
        let mut cache: LruCache<&str, Option<u32>> = LruCache::new(2).unwrap();

        cache.push("none", None);

        assert_eq!(cache.get("none"), Some(&None));
        assert_eq!(cache.get("absent"), None);
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut cache: LruCache<String, u32> = LruCache::new(2).unwrap();

        cache.push("doc".to_string(), 7);

        assert_eq!(cache.get("doc"), Some(&7));
        assert!(cache.contains("doc"));
    }

    #[test]
    fn test_remove() {
        let mut cache = LruCache::new(3).unwrap();

        cache.push(1, "a");
        cache.push(2, "b");
        cache.push(3, "c");

        assert_eq!(cache.remove(&2), Some("b"));
        assert_eq!(cache.remove(&2), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&2), None);
        cache.check_invariants();

        // The freed slot is usable again without evicting
        assert!(cache.push(4, "d").is_none());
        assert_eq!(cache.len(), 3);
        cache.check_invariants();
    }

    #[test]
    fn test_clear() {
        let mut cache = LruCache::new(3).unwrap();

        cache.push(1, "a");
        cache.push(2, "b");
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 3);
        assert!(cache.most_recent().is_none());
        cache.check_invariants();
    }

    #[test]
    fn test_most_and_least_recent() {
        let mut cache = LruCache::new(3).unwrap();

        cache.push("a", 1);
        cache.push("b", 2);
        cache.push("c", 3);
        cache.get("a");

        assert_eq!(cache.most_recent(), Some((&"a", &1)));
        assert_eq!(cache.least_recent(), Some((&"b", &2)));
    }

    #[test]
    fn test_resize_shrinks_from_tail() {
        let mut cache = LruCache::new(4).unwrap();

        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            cache.push(key, i);
        }
        cache.get("a");

        let evicted = cache.resize(2).unwrap();

        assert_eq!(evicted, vec![("b", 1), ("c", 2)]);
        assert_eq!(cache.capacity(), 2);
        assert_eq!(keys(&cache), vec!["a", "d"]);
        cache.check_invariants();
    }

    #[test]
    fn test_resize_grow_and_reject_zero() {
        let mut cache = LruCache::new(1).unwrap();
        cache.push("a", 1);

        assert!(cache.resize(3).unwrap().is_empty());
        cache.push("b", 2);
        cache.push("c", 3);
        assert_eq!(cache.len(), 3);

        assert_eq!(cache.resize(0), Err(CacheError::InvalidCapacity(0)));
        assert_eq!(cache.capacity(), 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_iteration_order() {
        let mut cache = LruCache::new(3).unwrap();

        cache.push("a", 1);
        cache.push("b", 2);
        cache.push("c", 3);
        cache.get("b");

        let pairs: Vec<_> = (&cache).into_iter().collect();
        assert_eq!(pairs, vec![(&"b", &2), (&"c", &3), (&"a", &1)]);
        assert_eq!(cache.values().rev().copied().collect::<Vec<_>>(), vec![1, 3, 2]);
        assert_eq!(cache.iter().len(), 3);
    }

    #[test]
    fn test_display_and_debug() {
        let mut cache = LruCache::new(3).unwrap();

        cache.push("a", 1);
        cache.push("b", 2);
        cache.push("c", 3);
        cache.get("a");

        assert_eq!(cache.to_string(), "[1, 3, 2]");
        assert_eq!(format!("{:?}", cache), r#"{"a": 1, "c": 3, "b": 2}"#);

        let empty: LruCache<&str, u32> = LruCache::default();
        assert_eq!(empty.to_string(), "[]");
    }
}
