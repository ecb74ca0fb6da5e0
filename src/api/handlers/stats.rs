//! Handlers for the statistics endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::dto::link::LinkInfo;
use crate::api::dto::stats::{
    DashboardResponse, LinkStatsQuery, LinkStatsResponse, StatsResponse,
};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// System-wide counters and the last seven days of activity.
///
/// # Endpoint
///
/// `GET /api/shorty-url/stats`
///
/// # Response
///
/// ```json
/// {
///   "overview": { "totalLinks": 120, "totalClicks": 5400, "...": 0 },
///   "weeklyStats": [ { "date": "2026-10-16", "linksCreated": 3, "clicks": 41 } ]
/// }
/// ```
///
/// `weeklyStats` always has seven entries, today first.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let (overview, weekly) =
        tokio::try_join!(state.stats_service.overview(), state.stats_service.weekly())?;

    Ok(Json(StatsResponse {
        overview: overview.into(),
        weekly_stats: weekly.into_iter().map(Into::into).collect(),
    }))
}

/// Recent and top links, hourly traffic and event totals.
///
/// # Endpoint
///
/// `GET /api/shorty-url/stats/dashboard`
pub async fn dashboard_handler(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let dashboard = state.stats_service.dashboard().await?;

    Ok(Json(DashboardResponse {
        recent_links: link_infos(&state, dashboard.recent_links),
        top_links: link_infos(&state, dashboard.top_links),
        hourly_distribution: dashboard
            .hourly_distribution
            .into_iter()
            .map(Into::into)
            .collect(),
        url_generated_events: dashboard.url_generated_events,
        qr_generated_events: dashboard.qr_generated_events,
    }))
}

/// Detailed traffic for one link.
///
/// # Endpoint
///
/// `GET /api/shorty-url/links/{code}/stats`
///
/// # Query Parameters
///
/// - `days` (optional): window of `dailyVisits`, 1 to 365 (default: 30)
/// - `limit` (optional): number of `topReferers`, 1 to 100 (default: 10)
///
/// # Errors
///
/// - **400**: malformed code or query parameters
/// - **404**: unknown code
pub async fn link_stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<LinkStatsQuery>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    query.validate()?;

    let detail = state
        .stats_service
        .per_link(&code, query.days(), query.limit())
        .await?;

    let short_url = state.link_service.short_url(&detail.link.short_code);

    Ok(Json(LinkStatsResponse {
        link: LinkInfo::new(detail.link, short_url),
        visit_stats: detail.visits.into(),
        daily_visits: detail.daily_visits.into_iter().map(Into::into).collect(),
        top_referers: detail.top_referers.into_iter().map(Into::into).collect(),
    }))
}

fn link_infos(state: &AppState, links: Vec<Link>) -> Vec<LinkInfo> {
    links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.short_code);
            LinkInfo::new(link, short_url)
        })
        .collect()
}
