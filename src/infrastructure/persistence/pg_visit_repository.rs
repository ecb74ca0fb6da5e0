//! PostgreSQL implementation of visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::{DailyRow, HourlyRow};
use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::{
    DIRECT_REFERER, DailyCount, HourlyCount, RefererCount, VisitRepository, VisitSummary,
};
use crate::error::AppError;

/// PostgreSQL repository for the visit log. Days are bucketed in UTC.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct VisitRow {
    id: i64,
    link_id: i64,
    visitor_ip: Option<String>,
    visitor_user_agent: Option<String>,
    referer: Option<String>,
    visited_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    total_visits: i64,
    unique_visitors: i64,
    visits_today: i64,
    visits_last_week: i64,
}

#[derive(sqlx::FromRow)]
struct RefererRow {
    referer: String,
    count: i64,
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let row = sqlx::query_as::<_, VisitRow>(
            r#"
            INSERT INTO visits (link_id, visitor_ip, visitor_user_agent, referer)
            VALUES ($1, $2, $3, $4)
            RETURNING id, link_id, visitor_ip, visitor_user_agent, referer, visited_at
            "#,
        )
        .bind(new_visit.link_id)
        .bind(&new_visit.visitor_ip)
        .bind(&new_visit.visitor_user_agent)
        .bind(&new_visit.referer)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Visit {
            id: row.id,
            link_id: row.link_id,
            visitor_ip: row.visitor_ip,
            visitor_user_agent: row.visitor_user_agent,
            referer: row.referer,
            visited_at: row.visited_at,
        })
    }

    async fn summary(&self, link_id: i64) -> Result<VisitSummary, AppError> {
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT
                COUNT(*) AS total_visits,
                COUNT(DISTINCT visitor_ip) AS unique_visitors,
                COUNT(*) FILTER (
                    WHERE (visited_at AT TIME ZONE 'UTC')::date = (NOW() AT TIME ZONE 'UTC')::date
                ) AS visits_today,
                COUNT(*) FILTER (WHERE visited_at >= NOW() - INTERVAL '7 days') AS visits_last_week
            FROM visits
            WHERE link_id = $1
            "#,
        )
        .bind(link_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(VisitSummary {
            total_visits: row.total_visits,
            unique_visitors: row.unique_visitors,
            visits_today: row.visits_today,
            visits_last_week: row.visits_last_week,
        })
    }

    async fn daily_visits(&self, link_id: i64, days: i64) -> Result<Vec<DailyCount>, AppError> {
        let rows = sqlx::query_as::<_, DailyRow>(
            r#"
            SELECT (visited_at AT TIME ZONE 'UTC')::date AS date, COUNT(*) AS count
            FROM visits
            WHERE link_id = $1
              AND (visited_at AT TIME ZONE 'UTC')::date > (NOW() AT TIME ZONE 'UTC')::date - $2::int
            GROUP BY 1
            ORDER BY 1 DESC
            "#,
        )
        .bind(link_id)
        .bind(days)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(DailyCount::from).collect())
    }

    async fn top_referers(
        &self,
        link_id: i64,
        limit: i64,
    ) -> Result<Vec<RefererCount>, AppError> {
        let rows = sqlx::query_as::<_, RefererRow>(
            r#"
            SELECT COALESCE(NULLIF(referer, ''), $3) AS referer, COUNT(*) AS count
            FROM visits
            WHERE link_id = $1
            GROUP BY 1
            ORDER BY count DESC, referer ASC
            LIMIT $2
            "#,
        )
        .bind(link_id)
        .bind(limit)
        .bind(DIRECT_REFERER)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RefererCount {
                referer: r.referer,
                count: r.count,
            })
            .collect())
    }

    async fn count_today(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM visits
            WHERE (visited_at AT TIME ZONE 'UTC')::date = (NOW() AT TIME ZONE 'UTC')::date
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn visits_per_day(&self, days: i64) -> Result<Vec<DailyCount>, AppError> {
        let rows = sqlx::query_as::<_, DailyRow>(
            r#"
            SELECT (visited_at AT TIME ZONE 'UTC')::date AS date, COUNT(*) AS count
            FROM visits
            WHERE (visited_at AT TIME ZONE 'UTC')::date > (NOW() AT TIME ZONE 'UTC')::date - $1::int
            GROUP BY 1
            ORDER BY 1 DESC
            "#,
        )
        .bind(days)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(DailyCount::from).collect())
    }

    async fn hourly_distribution(&self) -> Result<Vec<HourlyCount>, AppError> {
        let rows = sqlx::query_as::<_, HourlyRow>(
            r#"
            SELECT EXTRACT(HOUR FROM visited_at AT TIME ZONE 'UTC')::INT AS hour, COUNT(*) AS count
            FROM visits
            WHERE visited_at >= NOW() - INTERVAL '24 hours'
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(HourlyCount::from).collect())
    }
}
