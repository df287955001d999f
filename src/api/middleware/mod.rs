//! HTTP middleware for request processing and protection.
//!
//! Provides caller resolution, rate limiting, and observability middleware.

pub mod auth;
pub mod rate_limit;
pub mod tracing;

pub use auth::MaybeCaller;
