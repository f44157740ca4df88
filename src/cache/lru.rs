//! Recency List Module
//!
//! Keeps cache entries in access order for LRU eviction.

use crate::cache::entry::{Entry, Handle};

// == Recency List ==
/// Doubly-linked list of entries stored in an arena.
///
/// Entries live in `slots` and link to each other by index, so moving an
/// entry or dropping the tail never searches the list:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Slots freed by `remove` are recycled through `free`, which keeps every
/// live handle stable for as long as its entry exists.
#[derive(Debug, Clone)]
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free: Vec<Handle>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a new entry as the most recently used one.
    pub fn push_front(&mut self, key: K, value: V) -> Handle {
        let entry = Entry::new(key, value);
        let handle = match self.free.pop() {
            Some(handle) => {
                self.slots[handle] = Some(entry);
                handle
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };

        self.attach_front(handle);
        self.len += 1;
        handle
    }

    // == Touch ==
    /// Marks an entry as recently used (moves it to the head).
    pub fn touch(&mut self, handle: Handle) {
        if self.head == Some(handle) || self.get(handle).is_none() {
            return;
        }

        self.detach(handle);
        self.attach_front(handle);
    }

    // == Remove ==
    /// Unlinks an entry and releases its slot.
    pub fn remove(&mut self, handle: Handle) -> Option<Entry<K, V>> {
        self.get(handle)?;
        self.detach(handle);

        let entry = self.slots[handle].take()?;
        self.free.push(handle);
        self.len -= 1;
        Some(entry)
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used pair.
    ///
    /// Returns None if the list is empty.
    pub fn evict_oldest(&mut self) -> Option<(K, V)> {
        let tail = self.tail?;
        self.remove(tail).map(Entry::into_pair)
    }

    // == Peek ==
    /// Returns the least recently used entry without removing it.
    pub fn peek_oldest(&self) -> Option<&Entry<K, V>> {
        self.tail.and_then(|handle| self.get(handle))
    }

    /// Returns the most recently used entry.
    pub fn peek_newest(&self) -> Option<&Entry<K, V>> {
        self.head.and_then(|handle| self.get(handle))
    }

    // == Slot Access ==
    pub fn get(&self, handle: Handle) -> Option<&Entry<K, V>> {
        self.slots.get(handle).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(handle).and_then(Option::as_mut)
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.len
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iteration ==
    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    // == Linking ==
    fn attach_front(&mut self, handle: Handle) {
        let old_head = self.head;

        if let Some(entry) = self.get_mut(handle) {
            entry.prev = None;
            entry.next = old_head;
        }

        match old_head {
            Some(old) => {
                if let Some(entry) = self.get_mut(old) {
                    entry.prev = Some(handle);
                }
            }
            None => self.tail = Some(handle),
        }

        self.head = Some(handle);
    }

    fn detach(&mut self, handle: Handle) {
        let (prev, next) = match self.get_mut(handle) {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev {
            Some(prev) => {
                if let Some(entry) = self.get_mut(prev) {
                    entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next) => {
                if let Some(entry) = self.get_mut(next) {
                    entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }
}

// == Iterator ==
/// Iterator over cache entries in recency order, most recent first.
///
/// Iterating never changes recency.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    slots: &'a [Option<Entry<K, V>>],
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let entry = self.slots.get(self.front?)?.as_ref()?;
        self.front = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let entry = self.slots.get(self.back?)?.as_ref()?;
        self.back = entry.prev;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
