//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`            - Short link redirect (60 / min)
//! - `GET  /health`            - Health check
//! - `/api/shorty-url/*`       - Public REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Deadline** - Overall per-request timeout (504 on expiry)
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::rate_limit::{self, RateLimit};
use crate::api::middleware::{deadline, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Mount point of the REST API.
pub const API_PREFIX: &str = "/api/shorty-url";

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - overall deadline for a single request
///
/// Whether client IPs are read from proxy headers follows
/// [`AppState::behind_proxy`].
///
/// # Errors
///
/// Fails if a rate limiter cannot be built.
pub fn app_router(state: AppState, request_timeout: Duration) -> anyhow::Result<NormalizePath<Router>> {
    Ok(NormalizePathLayer::trim_trailing_slash().layer(app_routes(state, request_timeout)?))
}

/// The router of [`app_router`] without trailing-slash normalization.
///
/// # Errors
///
/// Fails if a rate limiter cannot be built.
pub fn app_routes(state: AppState, request_timeout: Duration) -> anyhow::Result<Router> {
    let behind_proxy = state.behind_proxy;

    let redirect = Router::new()
        .route("/{code}", get(redirect_handler))
        .layer(rate_limit::layer(RateLimit::REDIRECT, behind_proxy)?);

    Ok(Router::new()
        .route("/health", get(health_handler))
        .merge(redirect)
        .nest(API_PREFIX, api::routes::public_routes(behind_proxy)?)
        .with_state(state)
        .layer(middleware::from_fn_with_state(
            request_timeout,
            deadline::layer,
        ))
        .layer(tracing::layer()))
}
