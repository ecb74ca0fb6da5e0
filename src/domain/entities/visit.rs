//! Visit entity representing a single resolved redirect.

use chrono::{DateTime, Utc};

/// A visit recorded when a short link is successfully resolved.
///
/// Visits are append-only: created once per redirect and never mutated.
#[derive(Debug, Clone)]
pub struct Visit {
    pub id: i64,
    pub link_id: i64,
    pub visitor_ip: Option<String>,
    pub visitor_user_agent: Option<String>,
    pub referer: Option<String>,
    pub visited_at: DateTime<Utc>,
}

/// Input data for recording a visit.
///
/// The timestamp is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub link_id: i64,
    pub visitor_ip: Option<String>,
    pub visitor_user_agent: Option<String>,
    pub referer: Option<String>,
}
