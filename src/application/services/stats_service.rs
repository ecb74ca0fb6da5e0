//! Read-only statistics rollups over links and visits.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::services::{AnalyticsService, LinkService, VisitService};
use crate::domain::entities::{EventKind, Link};
use crate::domain::repositories::{
    AnalyticsRepository, DailyCount, HourlyCount, LinkRepository, RefererCount, VisitRepository,
    VisitSummary,
};
use crate::error::AppError;
use chrono::{Days, NaiveDate, Utc};

/// Number of days covered by [`StatsService::weekly`].
pub const WEEK_DAYS: u64 = 7;

/// Number of links listed in each dashboard table.
pub const DASHBOARD_LIST_SIZE: i64 = 10;

/// System-wide counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overview {
    pub total_links: i64,
    pub total_clicks: i64,
    pub total_blacklisted: i64,
    pub total_expired: i64,
    pub created_today: i64,
    pub visits_today: i64,
    pub total_qr_generated: i64,
}

/// Links created and visits recorded on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub links_created: i64,
    pub clicks: i64,
}

/// Everything known about one link's traffic.
#[derive(Debug, Clone)]
pub struct LinkDetail {
    pub link: Link,
    pub visits: VisitSummary,
    pub daily_visits: Vec<DailyCount>,
    pub top_referers: Vec<RefererCount>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub recent_links: Vec<Link>,
    pub top_links: Vec<Link>,
    /// 24 entries, one per hour of day, zero-filled.
    pub hourly_distribution: Vec<HourlyCount>,
    pub url_generated_events: i64,
    pub qr_generated_events: i64,
}

/// Aggregates statistics for the public stats pages.
///
/// Never writes, so it is safe to call under any concurrency.
pub struct StatsService<
    L: LinkRepository + ?Sized = dyn LinkRepository,
    V: VisitRepository + ?Sized = dyn VisitRepository,
    A: AnalyticsRepository + ?Sized = dyn AnalyticsRepository,
> {
    links: Arc<LinkService<L>>,
    visits: Arc<VisitService<V>>,
    analytics: Arc<AnalyticsService<A>>,
}

impl<L, V, A> StatsService<L, V, A>
where
    L: LinkRepository + ?Sized,
    V: VisitRepository + ?Sized,
    A: AnalyticsRepository + ?Sized,
{
    pub fn new(
        links: Arc<LinkService<L>>,
        visits: Arc<VisitService<V>>,
        analytics: Arc<AnalyticsService<A>>,
    ) -> Self {
        Self {
            links,
            visits,
            analytics,
        }
    }

    pub async fn overview(&self) -> Result<Overview, AppError> {
        let (links, visits_today) =
            tokio::try_join!(self.links.overview(), self.visits.count_today())?;

        Ok(Overview {
            total_links: links.total_links,
            total_clicks: links.total_clicks,
            total_blacklisted: links.total_blacklisted,
            total_expired: links.total_expired,
            created_today: links.created_today,
            visits_today,
            total_qr_generated: links.total_qr_generated,
        })
    }

    /// Activity for the last seven days, today first, days without activity
    /// reported as zero.
    pub async fn weekly(&self) -> Result<Vec<DailyActivity>, AppError> {
        let days = WEEK_DAYS as i64;
        let (created, visited) = tokio::try_join!(
            self.links.created_per_day(days),
            self.visits.visits_per_day(days)
        )?;

        Ok(fill_week(Utc::now().date_naive(), &created, &visited))
    }

    /// Detailed traffic for one link, addressed by full short URL or code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] for a malformed code and
    /// [`AppError::NotFound`] for an unknown one.
    pub async fn per_link(
        &self,
        short_code: &str,
        window_days: i64,
        referer_limit: i64,
    ) -> Result<LinkDetail, AppError> {
        let code = self.links.require_short_code(short_code)?;
        let link = self.links.find(&code).await?;

        let (visits, daily_visits, top_referers) = tokio::try_join!(
            self.visits.stats_for(link.id),
            self.visits.daily_visits(link.id, window_days),
            self.visits.top_referers(link.id, referer_limit),
        )?;

        Ok(LinkDetail {
            link,
            visits,
            daily_visits,
            top_referers,
        })
    }

    pub async fn dashboard(&self) -> Result<Dashboard, AppError> {
        let (recent_links, top_links, hourly, url_generated_events, qr_generated_events) = tokio::try_join!(
            self.links.recent(DASHBOARD_LIST_SIZE),
            self.links.top_performing(DASHBOARD_LIST_SIZE),
            self.visits.hourly_distribution(),
            self.analytics.count(EventKind::UrlGenerated),
            self.analytics.count(EventKind::QrGenerated),
        )?;

        Ok(Dashboard {
            recent_links,
            top_links,
            hourly_distribution: fill_hours(&hourly),
            url_generated_events,
            qr_generated_events,
        })
    }
}

fn fill_week(today: NaiveDate, created: &[DailyCount], visited: &[DailyCount]) -> Vec<DailyActivity> {
    let created: HashMap<NaiveDate, i64> = created.iter().map(|d| (d.date, d.count)).collect();
    let visited: HashMap<NaiveDate, i64> = visited.iter().map(|d| (d.date, d.count)).collect();

    (0..WEEK_DAYS)
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| DailyActivity {
            date,
            links_created: created.get(&date).copied().unwrap_or(0),
            clicks: visited.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

fn fill_hours(hourly: &[HourlyCount]) -> Vec<HourlyCount> {
    let counts: HashMap<i32, i64> = hourly.iter().map(|h| (h.hour, h.count)).collect();

    (0..24)
        .map(|hour| HourlyCount {
            hour,
            count: counts.get(&hour).copied().unwrap_or(0),
        })
        .collect()
}
