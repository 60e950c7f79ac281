//! Shared ambient plumbing for Aurum services: health endpoints,
//! request-id middleware, cache-control helpers, serialization helpers,
//! tracing initialization.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
