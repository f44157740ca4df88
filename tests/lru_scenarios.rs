//! Scenario Tests for the LRU Engine
//!
//! Exercises `LruCache` through its public API only.

use laroux::{CacheError, LruCache, DEFAULT_CAPACITY};

#[test]
fn test_capacity_two_evicts_first_inserted() {
    let mut cache = LruCache::new(2).unwrap();

    cache.push("a", 1);
    cache.push("b", 2);
    cache.push("c", 3);

    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.get("b"), Some(&2));
    assert_eq!(cache.get("c"), Some(&3));
}

#[test]
fn test_capacity_two_read_protects_entry() {
    let mut cache = LruCache::new(2).unwrap();

    cache.push("a", 1);
    cache.push("b", 2);
    assert_eq!(cache.get("a"), Some(&1));
    cache.push("c", 3);

    assert_eq!(cache.get("b"), None);
    assert_eq!(cache.get("a"), Some(&1));
    assert_eq!(cache.get("c"), Some(&3));
}

#[test]
fn test_zero_capacity_is_rejected() {
    let result = LruCache::<u32, u32>::new(0);
    assert!(matches!(result, Err(CacheError::InvalidCapacity(0))));
}

#[test]
fn test_capacity_one_keeps_latest() {
    let mut cache = LruCache::new(1).unwrap();

    for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
        cache.push(key, i);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.most_recent(), Some((&key, &i)));
    }
    assert!(!cache.contains("c"));
}

#[test]
fn test_default_cache_holds_thirty_two() {
    let mut cache: LruCache<usize, String> = LruCache::default();

    for i in 0..DEFAULT_CAPACITY + 8 {
        cache.push(i, format!("doc-{}", i));
    }

    assert_eq!(cache.len(), 32);
    assert_eq!(cache.least_recent(), Some((&8, &"doc-8".to_string())));
    assert!(!cache.contains(&7));
}

#[test]
fn test_update_keeps_size_and_refreshes() {
    let mut cache = LruCache::new(3).unwrap();

    cache.push("a", "v1");
    cache.push("b", "v1");
    cache.push("c", "v1");
    cache.push("a", "v2");

    assert_eq!(cache.len(), 3);
    assert_eq!(cache.to_string(), "[v2, v1, v1]");
    assert_eq!(cache.push("d", "v1"), Some(("b", "v1")));
    assert_eq!(cache.get("a"), Some(&"v2"));
}

#[test]
fn test_least_recently_touched_is_evicted() {
    let mut cache = LruCache::new(4).unwrap();

    for key in 1..=4 {
        cache.push(key, key * 10);
    }
    // Touch every key except 3, by read or write
    cache.get(&1);
    cache.push(2, 200);
    cache.get(&4);

    assert_eq!(cache.push(5, 50), Some((3, 30)));
    assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![5, 4, 2, 1]);
}

#[test]
fn test_fetch_on_miss_memoization() {
    let mut cache: LruCache<String, String> = LruCache::new(2).unwrap();
    let mut fetches = 0;

    let mut fetch = |cache: &mut LruCache<String, String>, url: &str| -> String {
        if let Some(doc) = cache.get(url) {
            return doc.clone();
        }
        fetches += 1;
        let doc = format!("<html>{}</html>", url);
        cache.push(url.to_string(), doc.clone());
        doc
    };

    fetch(&mut cache, "/index");
    fetch(&mut cache, "/about");
    fetch(&mut cache, "/index");
    fetch(&mut cache, "/blog"); // evicts /about
    fetch(&mut cache, "/about");

    assert_eq!(fetches, 4);
}
