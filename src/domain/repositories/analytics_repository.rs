//! Repository trait for the analytics event log.

use crate::domain::entities::{EventKind, NewAnalyticsEvent};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn track(&self, event: NewAnalyticsEvent) -> Result<(), AppError>;

    async fn count_by_kind(&self, kind: EventKind) -> Result<i64, AppError>;
}
