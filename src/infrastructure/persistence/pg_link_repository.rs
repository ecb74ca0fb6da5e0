//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::{DailyRow, LINK_COLUMNS, LinkRow, into_links};
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{DailyCount, LinkOverview, LinkRepository};
use crate::error::AppError;

/// PostgreSQL repository for links.
///
/// Counters are bumped with single `UPDATE ... SET x = x + 1` statements, so
/// concurrent redirects never lose increments.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OverviewRow {
    total_links: i64,
    total_clicks: i64,
    total_blacklisted: i64,
    total_expired: i64,
    created_today: i64,
    total_qr_generated: i64,
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            INSERT INTO links (long_url, short_code, creator_ip, creator_user_agent)
            VALUES ($1, $2, $3, $4)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&new_link.long_url)
        .bind(&new_link.short_code)
        .bind(&new_link.creator_ip)
        .bind(&new_link.creator_user_agent)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::try_from).transpose()
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE long_url = $1
            ORDER BY
                CASE status WHEN 'blacklisted' THEN 0 WHEN 'active' THEN 1 ELSE 2 END,
                created_at DESC,
                id DESC
            LIMIT 1
            "#
        ))
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::try_from).transpose()
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE links SET click_count = click_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn increment_qr(&self, code: &str) -> Result<Option<i64>, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE links
            SET qr_generated_count = qr_generated_count + 1
            WHERE short_code = $1
            RETURNING qr_generated_count
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn blacklist(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE links SET status = 'blacklisted' WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn expire(&self, id: i64) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE links SET status = 'expired' WHERE id = $1 AND status = 'active'")
                .bind(id)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn overview(&self) -> Result<LinkOverview, AppError> {
        let row = sqlx::query_as::<_, OverviewRow>(
            r#"
            SELECT
                COUNT(*) AS total_links,
                COALESCE(SUM(click_count), 0)::BIGINT AS total_clicks,
                COUNT(*) FILTER (WHERE status = 'blacklisted') AS total_blacklisted,
                COUNT(*) FILTER (WHERE status = 'expired') AS total_expired,
                COUNT(*) FILTER (
                    WHERE (created_at AT TIME ZONE 'UTC')::date = (NOW() AT TIME ZONE 'UTC')::date
                ) AS created_today,
                COALESCE(SUM(qr_generated_count), 0)::BIGINT AS total_qr_generated
            FROM links
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(LinkOverview {
            total_links: row.total_links,
            total_clicks: row.total_clicks,
            total_blacklisted: row.total_blacklisted,
            total_expired: row.total_expired,
            created_today: row.created_today,
            total_qr_generated: row.total_qr_generated,
        })
    }

    async fn created_per_day(&self, days: i64) -> Result<Vec<DailyCount>, AppError> {
        let rows = sqlx::query_as::<_, DailyRow>(
            r#"
            SELECT (created_at AT TIME ZONE 'UTC')::date AS date, COUNT(*) AS count
            FROM links
            WHERE (created_at AT TIME ZONE 'UTC')::date > (NOW() AT TIME ZONE 'UTC')::date - $1::int
            GROUP BY 1
            ORDER BY 1 DESC
            "#,
        )
        .bind(days)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(DailyCount::from).collect())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE status = 'active'
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        into_links(rows)
    }

    async fn top_performing(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE status = 'active'
            ORDER BY click_count DESC, created_at DESC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        into_links(rows)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
