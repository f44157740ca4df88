//! Laroux - A simple, friendly LRU cache
//!
//! The `cache` module holds a generic fixed-capacity LRU engine. The `api`
//! module serves a string-keyed instance of it over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{LruCache, DEFAULT_CAPACITY};
pub use config::Config;
pub use error::CacheError;
