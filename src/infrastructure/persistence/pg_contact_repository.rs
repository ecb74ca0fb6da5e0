//! PostgreSQL implementation of contact repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Contact, NewContact};
use crate::domain::repositories::ContactRepository;
use crate::error::AppError;

pub struct PgContactRepository {
    pool: Arc<PgPool>,
}

impl PgContactRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i64,
    fullname: String,
    email: String,
    message: String,
    sender_ip: String,
    sender_user_agent: Option<String>,
    status: String,
    sent_at: DateTime<Utc>,
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn create(&self, new_contact: NewContact) -> Result<Contact, AppError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contacts (fullname, email, message, sender_ip, sender_user_agent)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, fullname, email, message, sender_ip, sender_user_agent, status, sent_at
            "#,
        )
        .bind(&new_contact.fullname)
        .bind(&new_contact.email)
        .bind(&new_contact.message)
        .bind(&new_contact.sender_ip)
        .bind(&new_contact.sender_user_agent)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Contact {
            id: row.id,
            fullname: row.fullname,
            email: row.email,
            message: row.message,
            sender_ip: row.sender_ip,
            sender_user_agent: row.sender_user_agent,
            status: row.status,
            sent_at: row.sent_at,
        })
    }

    async fn count_recent_by_ip(&self, ip: &str, window_minutes: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM contacts
            WHERE sender_ip = $1 AND sent_at >= NOW() - make_interval(mins => $2::int)
            "#,
        )
        .bind(ip)
        .bind(window_minutes)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
