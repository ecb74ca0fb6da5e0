//! Repository trait for visit logging and visit aggregates.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Number of events on one UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Number of events in one hour of the day (0-23).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyCount {
    pub hour: i32,
    pub count: i64,
}

/// Visit counters for a single link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitSummary {
    pub total_visits: i64,
    pub unique_visitors: i64,
    pub visits_today: i64,
    pub visits_last_week: i64,
}

/// Visits grouped by referer. Visits without a referer are grouped under
/// [`DIRECT_REFERER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefererCount {
    pub referer: String,
    pub count: i64,
}

pub const DIRECT_REFERER: &str = "Direct";

/// Repository interface for the append-only visit log.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Appends one visit, timestamped by the store.
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError>;

    /// Totals, distinct visitor IPs, today's and last 7 days' visits.
    async fn summary(&self, link_id: i64) -> Result<VisitSummary, AppError>;

    /// Visits per UTC day for one link over the last `days` days, newest first.
    async fn daily_visits(&self, link_id: i64, days: i64) -> Result<Vec<DailyCount>, AppError>;

    /// Most frequent referers for one link, highest count first.
    async fn top_referers(&self, link_id: i64, limit: i64)
    -> Result<Vec<RefererCount>, AppError>;

    /// Visits across all links since UTC midnight.
    async fn count_today(&self) -> Result<i64, AppError>;

    /// Visits per UTC day across all links over the last `days` days.
    async fn visits_per_day(&self, days: i64) -> Result<Vec<DailyCount>, AppError>;

    /// Visits of the last 24 hours grouped by hour of day.
    async fn hourly_distribution(&self) -> Result<Vec<HourlyCount>, AppError>;
}
