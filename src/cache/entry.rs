//! Cache Entry Module
//!
//! Defines the arena slot that holds one cached association and its links
//! into the recency list.

// == Handle ==
/// Stable index of an entry inside the recency arena.
pub(crate) type Handle = usize;

// == Entry ==
/// A single cached key/value pair plus its neighbours in recency order.
///
/// `prev` points towards the head (more recent), `next` towards the tail
/// (less recent). Both are `None` at the respective ends of the list.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    /// The key, immutable once the entry exists
    pub key: K,
    /// The cached payload
    pub value: V,
    /// More recently used neighbour
    pub prev: Option<Handle>,
    /// Less recently used neighbour
    pub next: Option<Handle>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates a detached entry.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    // == Into Pair ==
    /// Consumes the entry, dropping its links.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
