//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a link.
///
/// A single tagged value replaces the pair of `expired`/`blacklisted` flags, so
/// "expired and blacklisted at once" cannot be represented. Where a decision
/// has to rank the two terminal states (redirect resolution), `Expired` is
/// checked before `Blacklisted`.
///
/// Transitions:
/// - `Active -> Blacklisted` (abuse escalation or moderation, one-way)
/// - `Active -> Expired` (external moderation lever)
/// - `Expired -> Blacklisted` (blacklisting is unconditional)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LinkStatus {
    #[default]
    Active,
    Expired,
    Blacklisted,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Active => "active",
            LinkStatus::Expired => "expired",
            LinkStatus::Blacklisted => "blacklisted",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status string is not recognised.
#[derive(Debug, thiserror::Error)]
#[error("unknown link status: {0}")]
pub struct UnknownLinkStatus(pub String);

impl FromStr for LinkStatus {
    type Err = UnknownLinkStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(LinkStatus::Active),
            "expired" => Ok(LinkStatus::Expired),
            "blacklisted" => Ok(LinkStatus::Blacklisted),
            other => Err(UnknownLinkStatus(other.to_string())),
        }
    }
}

/// A shortened URL with its lifecycle status and counters.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub long_url: String,
    pub short_code: String,
    pub status: LinkStatus,
    pub click_count: i64,
    pub qr_generated_count: i64,
    pub created_at: DateTime<Utc>,
    pub creator_ip: Option<String>,
    pub creator_user_agent: Option<String>,
}

impl Link {
    pub fn is_active(&self) -> bool {
        self.status == LinkStatus::Active
    }

    pub fn is_blacklisted(&self) -> bool {
        self.status == LinkStatus::Blacklisted
    }

    pub fn is_expired(&self) -> bool {
        self.status == LinkStatus::Expired
    }
}

/// Input data for creating a new link. New links always start `Active`.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub long_url: String,
    pub short_code: String,
    pub creator_ip: Option<String>,
    pub creator_user_agent: Option<String>,
}
