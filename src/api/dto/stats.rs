//! DTOs for the statistics endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use super::link::LinkInfo;
use crate::application::services::{DailyActivity, Overview};
use crate::domain::repositories::{DailyCount, HourlyCount, RefererCount, VisitSummary};

/// Default window of `GET /links/{code}/stats`, in days.
pub const DEFAULT_STATS_DAYS: i64 = 30;

/// Default number of referers in `GET /links/{code}/stats`.
pub const DEFAULT_REFERER_LIMIT: i64 = 10;

/// Response of `GET /api/shorty-url/stats`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub overview: OverviewDto,
    pub weekly_stats: Vec<DailyActivityDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewDto {
    pub total_links: i64,
    pub total_clicks: i64,
    pub total_blacklisted: i64,
    pub total_expired: i64,
    pub created_today: i64,
    pub visits_today: i64,
    pub total_qr_generated: i64,
}

impl From<Overview> for OverviewDto {
    fn from(o: Overview) -> Self {
        Self {
            total_links: o.total_links,
            total_clicks: o.total_clicks,
            total_blacklisted: o.total_blacklisted,
            total_expired: o.total_expired,
            created_today: o.created_today,
            visits_today: o.visits_today,
            total_qr_generated: o.total_qr_generated,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivityDto {
    pub date: NaiveDate,
    pub links_created: i64,
    pub clicks: i64,
}

impl From<DailyActivity> for DailyActivityDto {
    fn from(d: DailyActivity) -> Self {
        Self {
            date: d.date,
            links_created: d.links_created,
            clicks: d.clicks,
        }
    }
}

/// Response of `GET /api/shorty-url/stats/dashboard`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub recent_links: Vec<LinkInfo>,
    pub top_links: Vec<LinkInfo>,
    pub hourly_distribution: Vec<HourlyCountDto>,
    pub url_generated_events: i64,
    pub qr_generated_events: i64,
}

#[derive(Debug, Serialize)]
pub struct HourlyCountDto {
    pub hour: i32,
    pub count: i64,
}

impl From<HourlyCount> for HourlyCountDto {
    fn from(h: HourlyCount) -> Self {
        Self {
            hour: h.hour,
            count: h.count,
        }
    }
}

/// Query parameters of `GET /api/shorty-url/links/{code}/stats`.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LinkStatsQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 365))]
    pub days: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl LinkStatsQuery {
    pub fn days(&self) -> i64 {
        self.days.unwrap_or(DEFAULT_STATS_DAYS)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_REFERER_LIMIT)
    }
}

/// Response of `GET /api/shorty-url/links/{code}/stats`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStatsResponse {
    pub link: LinkInfo,
    pub visit_stats: VisitStatsDto,
    pub daily_visits: Vec<DailyCountDto>,
    pub top_referers: Vec<RefererCountDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStatsDto {
    pub total_visits: i64,
    pub unique_visitors: i64,
    pub visits_today: i64,
    pub visits_last_week: i64,
}

impl From<VisitSummary> for VisitStatsDto {
    fn from(v: VisitSummary) -> Self {
        Self {
            total_visits: v.total_visits,
            unique_visitors: v.unique_visitors,
            visits_today: v.visits_today,
            visits_last_week: v.visits_last_week,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DailyCountDto {
    pub date: NaiveDate,
    pub count: i64,
}

impl From<DailyCount> for DailyCountDto {
    fn from(d: DailyCount) -> Self {
        Self {
            date: d.date,
            count: d.count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefererCountDto {
    pub referer: String,
    pub count: i64,
}

impl From<RefererCount> for RefererCountDto {
    fn from(r: RefererCount) -> Self {
        Self {
            referer: r.referer,
            count: r.count,
        }
    }
}
