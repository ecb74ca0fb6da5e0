//! Abuse report intake with duplicate suppression and auto-flagging.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::RequestContext;
use crate::domain::entities::{NewReport, Report};
use crate::domain::repositories::{LinkRepository, ReportRepository};
use crate::error::AppError;
use serde_json::json;

/// Thresholds applied to incoming reports.
#[derive(Debug, Clone, Copy)]
pub struct ReportPolicy {
    /// One report per IP and short code within this many hours.
    pub dedup_window_hours: i64,
    /// Total reports against a code that blacklist its link.
    pub flag_threshold: i64,
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self {
            dedup_window_hours: 24,
            flag_threshold: 3,
        }
    }
}

/// A validated report submission.
#[derive(Debug, Clone)]
pub struct SubmitReport {
    pub reporter_email: String,
    /// Full short URL or bare code.
    pub short_code: String,
    pub detail: String,
}

pub struct ReportService<
    L: LinkRepository + ?Sized = dyn LinkRepository,
    R: ReportRepository + ?Sized = dyn ReportRepository,
> {
    links: Arc<LinkService<L>>,
    report_repository: Arc<R>,
    policy: ReportPolicy,
}

impl<L: LinkRepository + ?Sized, R: ReportRepository + ?Sized> ReportService<L, R> {
    pub fn new(links: Arc<LinkService<L>>, report_repository: Arc<R>, policy: ReportPolicy) -> Self {
        Self {
            links,
            report_repository,
            policy,
        }
    }

    /// Files a report and blacklists the link once the threshold is reached.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the short URL is malformed
    /// - [`AppError::NotFound`] if the code is unknown
    /// - [`AppError::Conflict`] if this IP reported the code recently; nothing
    ///   is written in that case
    pub async fn submit(
        &self,
        submission: SubmitReport,
        ctx: &RequestContext,
    ) -> Result<Report, AppError> {
        let short_code = self.links.require_short_code(&submission.short_code)?;
        let link = self.links.find(&short_code).await?;
        let reporter_ip = ctx.ip_or_unknown().to_string();

        let new_report = NewReport {
            reporter_email: submission.reporter_email,
            short_code: short_code.clone(),
            link_id: link.id,
            detail: submission.detail,
            reporter_ip: reporter_ip.clone(),
            reporter_user_agent: ctx.user_agent.clone(),
        };

        let report = self
            .report_repository
            .create_unless_recent(new_report, self.policy.dedup_window_hours)
            .await?
            .ok_or_else(|| {
                tracing::warn!(short_code = %short_code, ip = %reporter_ip, "Duplicate report suppressed");
                AppError::conflict(
                    "You have already reported this URL recently",
                    json!({ "short_code": short_code }),
                )
            })?;

        tracing::info!(report_id = report.id, short_code = %short_code, "Report submitted");

        let count = self.report_repository.count_by_code(&short_code).await?;
        if count >= self.policy.flag_threshold && !link.is_blacklisted() {
            self.links.flag(link.id).await?;
            tracing::warn!(
                short_code = %short_code,
                report_count = count,
                "Link auto-flagged after multiple reports"
            );
        }

        Ok(report)
    }

    /// Looks up a report, visible only from the IP that filed it.
    pub async fn status(&self, report_id: i64, ctx: &RequestContext) -> Result<Report, AppError> {
        self.report_repository
            .find_for_reporter(report_id, ctx.ip_or_unknown())
            .await?
            .ok_or_else(|| AppError::not_found("Report not found", json!({ "report_id": report_id })))
    }
}
