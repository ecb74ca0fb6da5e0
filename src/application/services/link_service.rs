//! Link issuance, lookup and lifecycle service.

use std::sync::Arc;

use crate::domain::RequestContext;
use crate::domain::entities::{Link, LinkStatus, NewLink};
use crate::domain::repositories::{
    ACTIVE_LONG_URL_CONSTRAINT, DailyCount, LinkOverview, LinkRepository, SHORT_CODE_CONSTRAINT,
};
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_validator::validate_long_url;
use serde_json::json;
use url::Url;

/// Upper bound on generate-then-insert attempts for one issuance.
const MAX_ISSUE_ATTEMPTS: usize = 10;

/// Settings for code generation and short URL composition.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    pub generator: CodeGenerator,
    /// Public base of short URLs, e.g. `https://shorty.co/`.
    pub short_url_base: String,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            generator: CodeGenerator::default(),
            short_url_base: "https://shorty.co/".to_string(),
        }
    }
}

/// Result of [`LinkService::issue`].
#[derive(Debug, Clone)]
pub struct IssuedLink {
    pub link: Link,
    /// `true` if an already active link for the URL was returned.
    pub is_existing: bool,
}

/// Service owning every mutation of links: issuance, click and QR counters,
/// blacklisting and expiry.
///
/// Uniqueness is never checked ahead of an insert. Issuance inserts a freshly
/// generated code and lets the store's unique constraints decide, retrying on
/// code collisions.
pub struct LinkService<L: LinkRepository + ?Sized = dyn LinkRepository> {
    link_repository: Arc<L>,
    generator: CodeGenerator,
    short_url_base: String,
    own_host: Option<String>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// The short URL base is normalised to end with `/`.
    pub fn new(link_repository: Arc<L>, settings: LinkSettings) -> Self {
        let mut short_url_base = settings.short_url_base;
        if !short_url_base.ends_with('/') {
            short_url_base.push('/');
        }

        let own_host = Url::parse(&short_url_base)
            .ok()
            .and_then(|url| url.host_str().map(str::to_ascii_lowercase));

        Self {
            link_repository,
            generator: settings.generator,
            short_url_base,
            own_host,
        }
    }

    pub fn generator(&self) -> &CodeGenerator {
        &self.generator
    }

    /// Issues a short code for `long_url`, or returns the active one.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the URL fails validation
    /// - [`AppError::Blocked`] if the URL is blacklisted
    /// - [`AppError::Storage`] if no free code was found within the attempt
    ///   limit, or on store failures
    pub async fn issue(
        &self,
        long_url: &str,
        ctx: &RequestContext,
    ) -> Result<IssuedLink, AppError> {
        let long_url = validate_long_url(long_url, self.own_host.as_deref())
            .map_err(|e| AppError::bad_request(e.to_string(), json!({ "field": "url" })))?;

        if let Some(existing) = self.link_repository.find_by_long_url(&long_url).await? {
            match existing.status {
                LinkStatus::Blacklisted => {
                    tracing::warn!(
                        short_code = %existing.short_code,
                        ip = ctx.ip_or_unknown(),
                        "Attempt to shorten a blacklisted URL"
                    );
                    return Err(blocked_url(&existing));
                }
                LinkStatus::Active => {
                    return Ok(IssuedLink {
                        link: existing,
                        is_existing: true,
                    });
                }
                LinkStatus::Expired => {}
            }
        }

        for attempt in 1..=MAX_ISSUE_ATTEMPTS {
            let new_link = NewLink {
                long_url: long_url.clone(),
                short_code: self.generator.generate(),
                creator_ip: ctx.ip.clone(),
                creator_user_agent: ctx.user_agent.clone(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    tracing::info!(
                        short_code = %link.short_code,
                        link_id = link.id,
                        attempt,
                        "Short link issued"
                    );
                    return Ok(IssuedLink {
                        link,
                        is_existing: false,
                    });
                }
                Err(e) if e.is_conflict_on(SHORT_CODE_CONSTRAINT) => {
                    tracing::debug!(attempt, "Short code collision, retrying");
                }
                Err(e) if e.is_conflict_on(ACTIVE_LONG_URL_CONSTRAINT) => {
                    // A concurrent request activated a link for this URL first.
                    match self.link_repository.find_by_long_url(&long_url).await? {
                        Some(link) if link.is_active() => {
                            return Ok(IssuedLink {
                                link,
                                is_existing: true,
                            });
                        }
                        Some(link) if link.is_blacklisted() => return Err(blocked_url(&link)),
                        _ => {}
                    }
                }
                Err(e) => return Err(e),
            }
        }

        tracing::error!(
            attempts = MAX_ISSUE_ATTEMPTS,
            "Failed to find a free short code"
        );
        Err(AppError::storage(
            "Failed to generate a unique short code",
            json!({ "attempts": MAX_ISSUE_ATTEMPTS }),
        ))
    }

    /// Retrieves a link by its short code, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn find(&self, short_code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "short_code": short_code }))
            })
    }

    /// Retrieves the most relevant link for a long URL (blacklisted over
    /// active over expired).
    pub async fn find_by_long_url(&self, long_url: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_long_url(long_url)
            .await?
            .ok_or_else(|| AppError::not_found("No link for this URL", json!({})))
    }

    pub async fn increment_clicks(&self, link_id: i64) -> Result<(), AppError> {
        self.link_repository.increment_clicks(link_id).await
    }

    /// Blacklists a link. Idempotent.
    pub async fn flag(&self, link_id: i64) -> Result<(), AppError> {
        if self.link_repository.blacklist(link_id).await? {
            tracing::info!(link_id, "Link blacklisted");
            Ok(())
        } else {
            Err(AppError::not_found(
                "Short link not found",
                json!({ "link_id": link_id }),
            ))
        }
    }

    /// Expires an active link. Returns `false` for links that are not active.
    pub async fn expire(&self, link_id: i64) -> Result<bool, AppError> {
        let expired = self.link_repository.expire(link_id).await?;
        if expired {
            tracing::info!(link_id, "Link expired");
        }
        Ok(expired)
    }

    /// Records a QR code generation for a short URL or bare code.
    ///
    /// Returns the short code and the updated QR counter.
    pub async fn track_qr(&self, short_url: &str) -> Result<(String, i64), AppError> {
        let code = self.require_short_code(short_url)?;

        match self.link_repository.increment_qr(&code).await? {
            Some(count) => Ok((code, count)),
            None => Err(AppError::not_found(
                "Short link not found",
                json!({ "short_code": code }),
            )),
        }
    }

    /// Composes the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}{}", self.short_url_base, code)
    }

    /// Extracts a short code from a full short URL or a bare code.
    ///
    /// Full URLs must be on the service's own host. Returns `None` if the
    /// result does not have the shape of a generated code.
    pub fn parse_short_code(&self, input: &str) -> Option<String> {
        let input = input.trim();

        let candidate = if let Some(rest) = input.strip_prefix(self.short_url_base.as_str()) {
            rest.to_string()
        } else if input.contains("://") {
            let url = Url::parse(input).ok()?;
            let host = url.host_str()?.to_ascii_lowercase();
            let own = self.own_host.as_deref()?;
            if host != own && host.strip_prefix("www.") != Some(own) {
                return None;
            }
            url.path().trim_matches('/').to_string()
        } else {
            input.to_string()
        };

        let candidate = candidate.trim_end_matches('/');
        self.generator
            .matches_format(candidate)
            .then(|| candidate.to_string())
    }

    /// Like [`Self::parse_short_code`], as an [`AppError::InvalidInput`].
    pub fn require_short_code(&self, input: &str) -> Result<String, AppError> {
        self.parse_short_code(input).ok_or_else(|| {
            AppError::bad_request("Invalid short URL", json!({ "value": input }))
        })
    }

    pub async fn overview(&self) -> Result<LinkOverview, AppError> {
        self.link_repository.overview().await
    }

    pub async fn created_per_day(&self, days: i64) -> Result<Vec<DailyCount>, AppError> {
        self.link_repository.created_per_day(days).await
    }

    pub async fn recent(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        self.link_repository.recent(limit).await
    }

    pub async fn top_performing(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        self.link_repository.top_performing(limit).await
    }

    /// Checks that the link store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}

fn blocked_url(link: &Link) -> AppError {
    AppError::blocked(
        "This URL has been blacklisted",
        json!({ "short_code": link.short_code }),
    )
}
