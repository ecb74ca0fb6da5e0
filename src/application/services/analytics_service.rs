//! Product analytics event log.

use std::sync::Arc;

use crate::domain::entities::{EventKind, NewAnalyticsEvent};
use crate::domain::repositories::AnalyticsRepository;
use crate::domain::{BestEffort, RequestContext};
use crate::error::AppError;

pub struct AnalyticsService<A: AnalyticsRepository + ?Sized = dyn AnalyticsRepository> {
    analytics_repository: Arc<A>,
}

impl<A: AnalyticsRepository + ?Sized> AnalyticsService<A> {
    pub fn new(analytics_repository: Arc<A>) -> Self {
        Self {
            analytics_repository,
        }
    }

    /// Logs an event. Failures are logged and swallowed.
    pub async fn track(
        &self,
        kind: EventKind,
        data: Option<String>,
        ctx: &RequestContext,
    ) -> BestEffort {
        let event = NewAnalyticsEvent {
            kind,
            data,
            ip: ctx.ip.clone(),
            user_agent: ctx.user_agent.clone(),
        };

        BestEffort::from_result(
            self.analytics_repository.track(event).await,
            "analytics_event",
        )
    }

    pub async fn count(&self, kind: EventKind) -> Result<i64, AppError> {
        self.analytics_repository.count_by_kind(kind).await
    }
}
