//! Redirect resolution: short code to destination.

use std::sync::Arc;

use crate::application::services::{LinkService, VisitService};
use crate::domain::RequestContext;
use crate::domain::entities::LinkStatus;
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;

/// Terminal states of a redirect request.
///
/// Store failures are not an outcome: they surface as `Err(AppError)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    Resolved { long_url: String },
    NotFound,
    Expired,
    Blacklisted,
    InvalidParam,
}

/// Resolves short codes for the redirect endpoint.
///
/// Single pass, no retries. Only a resolved redirect touches the click
/// counter and the visit log.
pub struct RedirectService<
    L: LinkRepository + ?Sized = dyn LinkRepository,
    V: VisitRepository + ?Sized = dyn VisitRepository,
> {
    links: Arc<LinkService<L>>,
    visits: Arc<VisitService<V>>,
}

impl<L: LinkRepository + ?Sized, V: VisitRepository + ?Sized> RedirectService<L, V> {
    pub fn new(links: Arc<LinkService<L>>, visits: Arc<VisitService<V>>) -> Self {
        Self { links, visits }
    }

    /// Resolves `param` to a destination.
    ///
    /// For an active link the click increment and the visit insert run
    /// concurrently. A failed visit insert does not undo the increment; a
    /// failed increment is an error.
    pub async fn resolve(
        &self,
        param: &str,
        ctx: &RequestContext,
    ) -> Result<RedirectOutcome, AppError> {
        if !self.links.generator().matches_format(param) {
            tracing::debug!(param, "Rejected malformed short code");
            return Ok(RedirectOutcome::InvalidParam);
        }

        let link = match self.links.find(param).await {
            Ok(link) => link,
            Err(AppError::NotFound { .. }) => {
                tracing::warn!(short_code = param, ip = ctx.ip_or_unknown(), "Unknown short code");
                return Ok(RedirectOutcome::NotFound);
            }
            Err(e) => return Err(e),
        };

        match link.status {
            LinkStatus::Expired => {
                tracing::info!(short_code = param, "Redirect to expired link refused");
                Ok(RedirectOutcome::Expired)
            }
            LinkStatus::Blacklisted => {
                tracing::warn!(
                    short_code = param,
                    ip = ctx.ip_or_unknown(),
                    "Redirect to blacklisted link refused"
                );
                Ok(RedirectOutcome::Blacklisted)
            }
            LinkStatus::Active => {
                let (incremented, _recorded) = tokio::join!(
                    self.links.increment_clicks(link.id),
                    self.visits.record(link.id, ctx),
                );
                incremented?;

                Ok(RedirectOutcome::Resolved {
                    long_url: link.long_url,
                })
            }
        }
    }
}
