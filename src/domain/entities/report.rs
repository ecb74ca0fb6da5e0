//! Abuse report entity.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Moderation status of an abuse report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportStatus {
    #[default]
    Pending,
    Reviewed,
    Actioned,
    Dismissed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Reviewed => "reviewed",
            ReportStatus::Actioned => "actioned",
            ReportStatus::Dismissed => "dismissed",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown report status: {0}")]
pub struct UnknownReportStatus(pub String);

impl FromStr for ReportStatus {
    type Err = UnknownReportStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "reviewed" => Ok(ReportStatus::Reviewed),
            "actioned" => Ok(ReportStatus::Actioned),
            "dismissed" => Ok(ReportStatus::Dismissed),
            other => Err(UnknownReportStatus(other.to_string())),
        }
    }
}

/// A user-submitted abuse allegation against a short code.
#[derive(Debug, Clone)]
pub struct Report {
    pub id: i64,
    pub reporter_email: String,
    pub short_code: String,
    pub link_id: i64,
    pub detail: String,
    pub reporter_ip: String,
    pub reporter_user_agent: Option<String>,
    pub status: ReportStatus,
    pub reported_at: DateTime<Utc>,
}

/// Input data for filing a report. New reports start `Pending`.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub reporter_email: String,
    pub short_code: String,
    pub link_id: i64,
    pub detail: String,
    pub reporter_ip: String,
    pub reporter_user_agent: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_status_parsing() {
        assert_eq!(
            "actioned".parse::<ReportStatus>().unwrap(),
            ReportStatus::Actioned
        );
        assert!("closed".parse::<ReportStatus>().is_err());
        assert_eq!(ReportStatus::default().to_string(), "pending");
    }
}
