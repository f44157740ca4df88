//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key (marks it most recently used)
//! - `GET /contains/:key` - Membership test without touching recency
//! - `DELETE /del/:key` - Delete a key
//! - `GET /keys` - Keys from most to least recently used
//! - `PUT /resize` - Change capacity, evicting as needed
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
