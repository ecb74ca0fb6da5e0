//! HTTP middleware for request processing and protection.
//!
//! Provides rate limiting, request deadlines, and observability middleware.

pub mod deadline;
pub mod rate_limit;
pub mod tracing;
