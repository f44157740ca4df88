//! Cache Statistics Module
//!
//! Optional counters kept alongside an `LruCache`. The engine itself does not
//! count anything; `CacheStore` feeds these from the results it observes.

use serde::Serialize;

// == Cache Stats ==
/// Hit, miss and eviction counters plus the current fill level.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups that found their key
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Entries dropped by the LRU policy (pushes and shrinking resizes)
    pub evictions: u64,
    /// Entries currently held
    pub total_entries: usize,
    /// Maximum entries the cache may hold
    pub capacity: usize,
}

impl CacheStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Recording ==
    /// Counts one lookup as a hit or a miss.
    pub fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    /// Refreshes the size fields from the cache.
    pub fn set_occupancy(&mut self, total_entries: usize, capacity: usize) {
        self.total_entries = total_entries;
        self.capacity = capacity;
    }
}
