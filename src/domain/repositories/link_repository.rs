//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::DailyCount;
use crate::error::AppError;
use async_trait::async_trait;

/// Name of the unique constraint on `links.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "links_short_code_key";

/// Name of the partial unique index allowing one active link per long URL.
pub const ACTIVE_LONG_URL_CONSTRAINT: &str = "links_active_long_url_key";

/// System-wide link counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkOverview {
    pub total_links: i64,
    pub total_clicks: i64,
    pub total_blacklisted: i64,
    pub total_expired: i64,
    pub created_today: i64,
    pub total_qr_generated: i64,
}

/// Repository interface for managing short links.
///
/// Counter updates are single atomic statements; uniqueness of short codes
/// and of the active link per long URL is enforced by the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new active link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] whose `details.constraint` is either
    /// [`SHORT_CODE_CONSTRAINT`] (code collision) or
    /// [`ACTIVE_LONG_URL_CONSTRAINT`] (an active link for the URL exists).
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code, whatever its status.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds the most relevant link for a long URL.
    ///
    /// A blacklisted link wins over an active one, an active one over an
    /// expired one; the newest link wins within a status.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, AppError>;

    /// Atomically increments the click counter.
    async fn increment_clicks(&self, id: i64) -> Result<(), AppError>;

    /// Atomically increments the QR counter of a link, returning the new
    /// value, or `None` if the code is unknown.
    async fn increment_qr(&self, code: &str) -> Result<Option<i64>, AppError>;

    /// Marks a link as blacklisted regardless of its current status.
    ///
    /// Returns `false` if no link has this id.
    async fn blacklist(&self, id: i64) -> Result<bool, AppError>;

    /// Moves an active link to expired. Returns `false` if the link is
    /// unknown or not active.
    async fn expire(&self, id: i64) -> Result<bool, AppError>;

    async fn overview(&self) -> Result<LinkOverview, AppError>;

    /// Links created per UTC day over the last `days` days, days without
    /// links omitted, newest first.
    async fn created_per_day(&self, days: i64) -> Result<Vec<DailyCount>, AppError>;

    /// Most recently created active links.
    async fn recent(&self, limit: i64) -> Result<Vec<Link>, AppError>;

    /// Active links with the highest click counts.
    async fn top_performing(&self, limit: i64) -> Result<Vec<Link>, AppError>;

    /// Round-trips to the store without touching any rows.
    async fn ping(&self) -> Result<(), AppError>;
}
