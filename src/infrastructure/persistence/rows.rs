//! Row types shared by the PostgreSQL repositories.
//!
//! Queries are built with `sqlx::query_as` and checked at runtime, so the
//! crate builds without a reachable database.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::domain::entities::{Link, LinkStatus, Report, ReportStatus};
use crate::domain::repositories::{DailyCount, HourlyCount};
use crate::error::AppError;

/// Column list matching [`LinkRow`].
pub(crate) const LINK_COLUMNS: &str = "id, long_url, short_code, status, click_count, \
     qr_generated_count, created_at, creator_ip, creator_user_agent";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct LinkRow {
    pub id: i64,
    pub long_url: String,
    pub short_code: String,
    pub status: String,
    pub click_count: i64,
    pub qr_generated_count: i64,
    pub created_at: DateTime<Utc>,
    pub creator_ip: Option<String>,
    pub creator_user_agent: Option<String>,
}

impl TryFrom<LinkRow> for Link {
    type Error = AppError;

    fn try_from(row: LinkRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<LinkStatus>()
            .map_err(|e| AppError::internal(e.to_string(), json!({ "link_id": row.id })))?;

        Ok(Link {
            id: row.id,
            long_url: row.long_url,
            short_code: row.short_code,
            status,
            click_count: row.click_count,
            qr_generated_count: row.qr_generated_count,
            created_at: row.created_at,
            creator_ip: row.creator_ip,
            creator_user_agent: row.creator_user_agent,
        })
    }
}

pub(crate) fn into_links(rows: Vec<LinkRow>) -> Result<Vec<Link>, AppError> {
    rows.into_iter().map(Link::try_from).collect()
}

/// Column list matching [`ReportRow`].
pub(crate) const REPORT_COLUMNS: &str = "id, reporter_email, short_code, link_id, detail, \
     reporter_ip, reporter_user_agent, status, reported_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ReportRow {
    pub id: i64,
    pub reporter_email: String,
    pub short_code: String,
    pub link_id: i64,
    pub detail: String,
    pub reporter_ip: String,
    pub reporter_user_agent: Option<String>,
    pub status: String,
    pub reported_at: DateTime<Utc>,
}

impl TryFrom<ReportRow> for Report {
    type Error = AppError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ReportStatus>()
            .map_err(|e| AppError::internal(e.to_string(), json!({ "report_id": row.id })))?;

        Ok(Report {
            id: row.id,
            reporter_email: row.reporter_email,
            short_code: row.short_code,
            link_id: row.link_id,
            detail: row.detail,
            reporter_ip: row.reporter_ip,
            reporter_user_agent: row.reporter_user_agent,
            status,
            reported_at: row.reported_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct DailyRow {
    pub date: NaiveDate,
    pub count: i64,
}

impl From<DailyRow> for DailyCount {
    fn from(row: DailyRow) -> Self {
        DailyCount {
            date: row.date,
            count: row.count,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct HourlyRow {
    pub hour: i32,
    pub count: i64,
}

impl From<HourlyRow> for HourlyCount {
    fn from(row: HourlyRow) -> Self {
        HourlyCount {
            hour: row.hour,
            count: row.count,
        }
    }
}
