//! Visit recording and per-link visit analytics.

use std::sync::Arc;

use crate::domain::entities::NewVisit;
use crate::domain::repositories::{
    DailyCount, HourlyCount, RefererCount, VisitRepository, VisitSummary,
};
use crate::domain::{BestEffort, RequestContext};
use crate::error::AppError;

/// Service for the append-only visit log.
///
/// Recording is best-effort: a failed insert never fails the redirect that
/// triggered it.
pub struct VisitService<V: VisitRepository + ?Sized = dyn VisitRepository> {
    visit_repository: Arc<V>,
}

impl<V: VisitRepository + ?Sized> VisitService<V> {
    pub fn new(visit_repository: Arc<V>) -> Self {
        Self { visit_repository }
    }

    /// Appends a visit for `link_id` with the request's client metadata.
    pub async fn record(&self, link_id: i64, ctx: &RequestContext) -> BestEffort {
        let new_visit = NewVisit {
            link_id,
            visitor_ip: ctx.ip.clone(),
            visitor_user_agent: ctx.user_agent.clone(),
            referer: ctx.referer.clone(),
        };

        BestEffort::from_result(self.visit_repository.record(new_visit).await, "visit")
    }

    pub async fn stats_for(&self, link_id: i64) -> Result<VisitSummary, AppError> {
        self.visit_repository.summary(link_id).await
    }

    /// Visits per day for one link over `window_days` days, newest first.
    pub async fn daily_visits(
        &self,
        link_id: i64,
        window_days: i64,
    ) -> Result<Vec<DailyCount>, AppError> {
        self.visit_repository.daily_visits(link_id, window_days).await
    }

    /// Most frequent referers for one link. Direct visits count as `"Direct"`.
    pub async fn top_referers(
        &self,
        link_id: i64,
        limit: i64,
    ) -> Result<Vec<RefererCount>, AppError> {
        self.visit_repository.top_referers(link_id, limit).await
    }

    pub async fn count_today(&self) -> Result<i64, AppError> {
        self.visit_repository.count_today().await
    }

    pub async fn visits_per_day(&self, days: i64) -> Result<Vec<DailyCount>, AppError> {
        self.visit_repository.visits_per_day(days).await
    }

    pub async fn hourly_distribution(&self) -> Result<Vec<HourlyCount>, AppError> {
        self.visit_repository.hourly_distribution().await
    }
}
