//! DTOs for abuse reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::SubmitReport;
use crate::domain::entities::Report;

/// Request body for `POST /api/shorty-url/report`.
#[derive(Debug, Deserialize, Validate)]
pub struct ReportRequest {
    #[serde(alias = "reporterEmail")]
    #[validate(email(message = "Valid email is required"))]
    pub email: String,

    /// Short URL or bare short code being reported.
    #[serde(alias = "shortCode")]
    #[validate(length(min = 1, message = "Short URL is required"))]
    pub shorty: String,

    #[validate(length(min = 10, max = 500, message = "Detail must be 10 to 500 characters"))]
    pub detail: String,
}

impl From<ReportRequest> for SubmitReport {
    fn from(r: ReportRequest) -> Self {
        Self {
            reporter_email: r.email.trim().to_string(),
            short_code: r.shorty.trim().to_string(),
            detail: r.detail.trim().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub report_id: i64,
    pub message: String,
}

/// Response of `GET /api/shorty-url/report/status/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatusResponse {
    pub report_id: i64,
    pub short_code: String,
    pub status: &'static str,
    pub reported_at: DateTime<Utc>,
}

impl From<Report> for ReportStatusResponse {
    fn from(r: Report) -> Self {
        Self {
            report_id: r.id,
            short_code: r.short_code,
            status: r.status.as_str(),
            reported_at: r.reported_at,
        }
    }
}
