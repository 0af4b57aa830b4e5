//! service-core: Shared infrastructure for the proxy services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
