//! Validation of destination URLs submitted for shortening.
//!
//! Only absolute `https://` URLs pointing at a fully qualified domain name are
//! accepted. IP literals, single-label hosts and links back to the service's
//! own short-URL host are rejected.

use url::{Host, Url};

/// Maximum accepted length of a destination URL, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur while validating a destination URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Empty,

    #[error("URL exceeds maximum length of {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("Only HTTPS URLs are allowed")]
    UnsupportedProtocol,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL host must be a fully qualified domain name")]
    HostNotFqdn,

    #[error("Shortening links of this service is not allowed")]
    SelfReference,
}

/// Validates a destination URL and returns it trimmed of surrounding whitespace.
///
/// `own_host` is the host of the configured short-URL base; URLs on that host
/// are rejected to prevent recursive shortening.
///
/// # Errors
///
/// See [`UrlValidationError`] for the individual rules.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_long_url("https://example.com/page", Some("shorty.co")).is_ok());
/// assert!(validate_long_url("http://example.com", None).is_err());
/// assert!(validate_long_url("https://shorty.co/AbC12", Some("shorty.co")).is_err());
/// ```
pub fn validate_long_url(input: &str, own_host: Option<&str>) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    // `Url::parse` lowercases the scheme, so check the raw prefix.
    if !trimmed.starts_with("https://") {
        return Err(UrlValidationError::UnsupportedProtocol);
    }

    let url =
        Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    let domain = match url.host() {
        Some(Host::Domain(domain)) => domain,
        _ => return Err(UrlValidationError::HostNotFqdn),
    };

    if !is_fqdn(domain) {
        return Err(UrlValidationError::HostNotFqdn);
    }

    if own_host.is_some_and(|own| same_site(domain, own)) {
        return Err(UrlValidationError::SelfReference);
    }

    Ok(trimmed.to_string())
}

fn same_site(host: &str, own: &str) -> bool {
    let bare = |h: &str| h.strip_prefix("www.").unwrap_or(h).to_ascii_lowercase();
    bare(host) == bare(own)
}

/// Returns `true` for dotted hostnames whose labels are 1-63 alphanumeric or
/// hyphen characters (no leading or trailing hyphen) and whose last label is
/// an alphabetic TLD of at least two characters.
fn is_fqdn(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    let labels: Vec<&str> = host.split('.').collect();

    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    });

    let tld_ok = labels.last().is_some_and(|tld| {
        tld.len() >= 2
            && (tld.bytes().all(|b| b.is_ascii_alphabetic()) || tld.starts_with("xn--"))
    });

    labels_ok && tld_ok
}
