//! Repository trait for abuse reports.

use crate::domain::entities::{NewReport, Report};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for abuse reports.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgReportRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Inserts the report unless the same IP already reported the same short
    /// code within the last `window_hours` hours.
    ///
    /// The check and the insert are atomic per (short code, reporter IP),
    /// including under concurrent calls. Returns `None` when a recent
    /// duplicate exists and nothing was written.
    async fn create_unless_recent(
        &self,
        new_report: NewReport,
        window_hours: i64,
    ) -> Result<Option<Report>, AppError>;

    /// Counts all reports ever filed against a short code.
    async fn count_by_code(&self, short_code: &str) -> Result<i64, AppError>;

    /// Finds a report by id, only if it was filed from `reporter_ip`.
    async fn find_for_reporter(
        &self,
        id: i64,
        reporter_ip: &str,
    ) -> Result<Option<Report>, AppError>;
}
