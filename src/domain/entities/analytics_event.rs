//! Analytics event log entries.

use std::fmt;

/// Kind of product event written to the analytics log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    UrlGenerated,
    QrGenerated,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::UrlGenerated => "url_generated",
            EventKind::QrGenerated => "qr_generated",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input data for an analytics event. The timestamp is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAnalyticsEvent {
    pub kind: EventKind,
    pub data: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}
