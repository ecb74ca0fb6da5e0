//! API route configuration.
//!
//! Every route carries its own per-client rate limit, see
//! [`crate::api::middleware::rate_limit::RateLimit`].

use crate::api::handlers::{
    contact_handler, dashboard_handler, generate_handler, link_stats_handler, report_handler,
    report_status_handler, stats_handler, track_qr_handler,
};
use crate::api::middleware::rate_limit::{self, RateLimit};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public API routes, mounted under `/api/shorty-url`.
///
/// # Endpoints
///
/// - `POST /generate`              - Issue a short link (20 / 15 min)
/// - `POST /report`                - File an abuse report (5 / 15 min)
/// - `POST /contact`               - Send a contact message (3 / 15 min)
/// - `GET  /stats`                 - Overview and weekly activity
/// - `GET  /stats/dashboard`       - Recent and top links, hourly traffic
/// - `POST /stats/track-qr`        - Count a QR code rendering
/// - `GET  /links/{code}/stats`    - Per-link traffic
/// - `GET  /report/status/{id}`    - Status of the caller's report
///
/// Routes without a dedicated budget share 100 requests per 15 minutes.
///
/// # Errors
///
/// Fails if a rate limiter cannot be built.
pub fn public_routes(behind_proxy: bool) -> anyhow::Result<Router<AppState>> {
    let generate = Router::new()
        .route("/generate", post(generate_handler))
        .layer(rate_limit::layer(RateLimit::GENERATE, behind_proxy)?);

    let report = Router::new()
        .route("/report", post(report_handler))
        .layer(rate_limit::layer(RateLimit::REPORT, behind_proxy)?);

    let contact = Router::new()
        .route("/contact", post(contact_handler))
        .layer(rate_limit::layer(RateLimit::CONTACT, behind_proxy)?);

    let general = Router::new()
        .route("/stats", get(stats_handler))
        .route("/stats/dashboard", get(dashboard_handler))
        .route("/stats/track-qr", post(track_qr_handler))
        .route("/links/{code}/stats", get(link_stats_handler))
        .route("/report/status/{id}", get(report_status_handler))
        .layer(rate_limit::layer(RateLimit::API, behind_proxy)?);

    Ok(Router::new()
        .merge(generate)
        .merge(report)
        .merge(contact)
        .merge(general))
}
