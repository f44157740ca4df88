//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the SET operation (PUT /set)
///
/// Key and value limits are enforced by `CacheStore::set`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
}

/// Request body for the RESIZE operation (PUT /resize)
#[derive(Debug, Clone, Deserialize)]
pub struct ResizeRequest {
    /// New maximum number of entries, at least 1
    pub capacity: usize,
}
