//! Client metadata attached to write operations.

/// Maximum stored length of a `User-Agent` value, in characters.
pub const MAX_USER_AGENT_LENGTH: usize = 255;

/// Who made a request: client IP, user agent and referer.
///
/// Built once per request by the HTTP layer (see
/// [`crate::utils::client_info`]) and threaded through the services so that
/// links, visits, reports and contact messages record their origin.
///
/// All fields are optional to handle missing headers gracefully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl RequestContext {
    /// Creates a context, truncating the user agent to
    /// [`MAX_USER_AGENT_LENGTH`] characters and dropping empty values.
    pub fn new(ip: Option<String>, user_agent: Option<&str>, referer: Option<&str>) -> Self {
        Self {
            ip: ip.filter(|ip| !ip.is_empty()),
            user_agent: user_agent
                .filter(|ua| !ua.is_empty())
                .map(|ua| ua.chars().take(MAX_USER_AGENT_LENGTH).collect()),
            referer: referer.filter(|r| !r.is_empty()).map(str::to_string),
        }
    }

    /// Client IP, or `"unknown"` when it could not be determined.
    pub fn ip_or_unknown(&self) -> &str {
        self.ip.as_deref().unwrap_or("unknown")
    }
}
