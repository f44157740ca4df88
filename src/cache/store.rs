//! Cache Store Module
//!
//! String cache used by the HTTP layer: an `LruCache` plus request
//! validation and hit/miss/eviction statistics.

use tracing::debug;

use crate::cache::{CacheStats, LruCache, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{ApiError, ApiResult, Result};

// == Cache Store ==
/// LRU cache of string documents with statistics.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage in recency order
    cache: LruCache<String, String>,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store holding at most `capacity` entries.
    ///
    /// Fails with `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            cache: LruCache::new(capacity)?,
            stats: CacheStats::new(capacity),
        })
    }

    // == Set ==
    /// Stores a key-value pair, marking it most recently used.
    ///
    /// Returns the key evicted to make room, if any.
    pub fn set(&mut self, key: String, value: String) -> ApiResult<Option<String>> {
        validate_key(&key)?;

        if value.len() > MAX_VALUE_SIZE {
            return Err(ApiError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        let evicted = self.cache.push(key, value).map(|(evicted_key, _)| {
            debug!("Evicted least recently used key '{}'", evicted_key);
            evicted_key
        });

        if evicted.is_some() {
            self.stats.record_evictions(1);
        }

        Ok(evicted)
    }

    // == Get ==
    /// Retrieves a value by key, marking it most recently used.
    pub fn get(&mut self, key: &str) -> ApiResult<String> {
        let value = self.cache.get(key).cloned();
        self.stats.record_lookup(value.is_some());

        value.ok_or_else(|| ApiError::NotFound(key.to_string()))
    }

    // == Contains ==
    /// Membership test. Neither recency nor hit/miss counters change.
    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains(key)
    }

    // == Delete ==
    /// Removes an entry by key.
    pub fn delete(&mut self, key: &str) -> ApiResult<()> {
        self.cache
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(key.to_string()))
    }

    // == Resize ==
    /// Changes the capacity, returning how many entries were evicted.
    pub fn resize(&mut self, capacity: usize) -> ApiResult<usize> {
        let evicted = self.cache.resize(capacity)?;

        for (key, _) in &evicted {
            debug!("Evicted key '{}' while shrinking to {}", key, capacity);
        }
        self.stats.record_evictions(evicted.len());

        Ok(evicted.len())
    }

    // == Keys ==
    /// Returns all keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.cache.keys().cloned().collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_occupancy(self.cache.len(), self.cache.capacity());
        stats
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }
}

// == Validation ==
fn validate_key(key: &str) -> ApiResult<()> {
    if key.is_empty() {
        return Err(ApiError::InvalidRequest("Key cannot be empty".to_string()));
    }

    if key.len() > MAX_KEY_LENGTH {
        return Err(ApiError::InvalidRequest(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }

    Ok(())
}
