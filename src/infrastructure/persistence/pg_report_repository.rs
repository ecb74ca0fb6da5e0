//! PostgreSQL implementation of report repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::{REPORT_COLUMNS, ReportRow};
use crate::domain::entities::{NewReport, Report};
use crate::domain::repositories::ReportRepository;
use crate::error::AppError;

pub struct PgReportRepository {
    pool: Arc<PgPool>,
}

impl PgReportRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn create_unless_recent(
        &self,
        new_report: NewReport,
        window_hours: i64,
    ) -> Result<Option<Report>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Same-reporter submissions for one code queue here until commit, so
        // the NOT EXISTS below sees any row a concurrent call just wrote.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1 || '|' || $2))")
            .bind(&new_report.short_code)
            .bind(&new_report.reporter_ip)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            INSERT INTO reports
                (reporter_email, short_code, link_id, detail, reporter_ip, reporter_user_agent)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE NOT EXISTS (
                SELECT 1 FROM reports
                WHERE short_code = $2
                  AND reporter_ip = $5
                  AND reported_at >= NOW() - make_interval(hours => $7::int)
            )
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(&new_report.reporter_email)
        .bind(&new_report.short_code)
        .bind(new_report.link_id)
        .bind(&new_report.detail)
        .bind(&new_report.reporter_ip)
        .bind(&new_report.reporter_user_agent)
        .bind(window_hours)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        row.map(Report::try_from).transpose()
    }

    async fn count_by_code(&self, short_code: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reports WHERE short_code = $1")
            .bind(short_code)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn find_for_reporter(
        &self,
        id: i64,
        reporter_ip: &str,
    ) -> Result<Option<Report>, AppError> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1 AND reporter_ip = $2"
        ))
        .bind(id)
        .bind(reporter_ip)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Report::try_from).transpose()
    }
}
