//! Public representation of a link.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// A link as exposed by the stats endpoints.
///
/// Creator IP and user agent are never exposed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkInfo {
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
    pub status: &'static str,
    pub click_count: i64,
    pub qr_generated_count: i64,
    pub created_at: DateTime<Utc>,
}

impl LinkInfo {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            short_code: link.short_code,
            short_url,
            long_url: link.long_url,
            status: link.status.as_str(),
            click_count: link.click_count,
            qr_generated_count: link.qr_generated_count,
            created_at: link.created_at,
        }
    }
}
