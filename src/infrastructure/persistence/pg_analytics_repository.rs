//! PostgreSQL implementation of the analytics event log.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{EventKind, NewAnalyticsEvent};
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;

pub struct PgAnalyticsRepository {
    pool: Arc<PgPool>,
}

impl PgAnalyticsRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn track(&self, event: NewAnalyticsEvent) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO analytics_events (event_type, event_data, event_ip, event_agent)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(event.kind.as_str())
        .bind(&event.data)
        .bind(&event.ip)
        .bind(&event.user_agent)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count_by_kind(&self, kind: EventKind) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM analytics_events WHERE event_type = $1")
                .bind(kind.as_str())
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }
}
