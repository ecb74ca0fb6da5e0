//! HTTP surface: JSON payloads, handlers and the per-route middleware.
//!
//! Handlers stay thin. They validate input, build a
//! [`RequestContext`](crate::domain::RequestContext) and hand off to the
//! services in [`crate::application`].

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
