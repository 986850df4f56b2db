//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache statistics
//! - `GET /keys` - List current keys
//! - `GET /cache/:key` - Retrieve a value by key
//! - `PUT /cache/:key` - Store a value
//! - `DELETE /cache/:key` - Delete a key
//! - `DELETE /cache` - Clear the cache
//! - `POST /cleanup` - Remove expired entries

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
