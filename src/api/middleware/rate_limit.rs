//! Per-client rate limiting using the token bucket algorithm.

use axum::http::Request;
use governor::RateLimiter;
use governor::clock::{QuantaClock, QuantaInstant};
use governor::middleware::NoOpMiddleware;
use governor::state::keyed::DefaultKeyedStateStore;
use std::net::IpAddr;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tower_governor::{
    GovernorError, GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor,
};

use crate::utils::client_info::{client_ip, peer_ip_from_extensions};

/// Request budget for one group of routes.
///
/// A client may spend `requests` at once; the budget then refills evenly
/// over `per`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub requests: u32,
    pub per: Duration,
}

impl RateLimit {
    /// `GET /{code}`: 60 per minute.
    pub const REDIRECT: Self = Self::new(60, Duration::from_secs(60));
    /// Link issuance: 20 per 15 minutes.
    pub const GENERATE: Self = Self::new(20, Duration::from_secs(15 * 60));
    /// Abuse reports: 5 per 15 minutes.
    pub const REPORT: Self = Self::new(5, Duration::from_secs(15 * 60));
    /// Contact form: 3 per 15 minutes.
    pub const CONTACT: Self = Self::new(3, Duration::from_secs(15 * 60));
    /// Every other API route: 100 per 15 minutes.
    pub const API: Self = Self::new(100, Duration::from_secs(15 * 60));

    pub const fn new(requests: u32, per: Duration) -> Self {
        Self { requests, per }
    }

    /// Time to regain one request, never below one millisecond.
    fn replenish_interval_ms(&self) -> u64 {
        let per_ms = u64::try_from(self.per.as_millis()).unwrap_or(u64::MAX);
        (per_ms / u64::from(self.requests.max(1))).max(1)
    }
}

/// Keys rate limits by client IP, honouring proxy headers when configured.
///
/// Uses the same resolution as visit logging and report deduplication, see
/// [`client_ip`].
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    pub behind_proxy: bool,
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let peer = peer_ip_from_extensions(req.extensions());

        client_ip(req.headers(), peer, self.behind_proxy).ok_or(GovernorError::UnableToExtractKey)
    }
}

pub type RateLimitLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

type ClientLimiter =
    RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, QuantaClock, NoOpMiddleware<QuantaInstant>>;

/// How often idle clients are dropped from a limiter's state.
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Drops clients whose budget has fully refilled. Returns how many remain.
fn prune(limiter: &ClientLimiter) -> usize {
    limiter.retain_recent();
    limiter.len()
}

/// Prunes `limiter` every [`PRUNE_INTERVAL`] until its layer is dropped.
///
/// Does nothing outside a Tokio runtime.
fn spawn_pruner(limiter: Weak<ClientLimiter>) {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        return;
    };

    runtime.spawn(async move {
        let mut ticker = tokio::time::interval(PRUNE_INTERVAL);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let Some(limiter) = limiter.upgrade() else {
                break;
            };
            let tracked = prune(&limiter);
            tracing::debug!(tracked, "Pruned rate limiter state");
        }
    });
}

/// Creates a rate limiter enforcing `limit` per client IP.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Errors
///
/// Fails if `limit` allows zero requests.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/generate", post(generate_handler))
///     .layer(rate_limit::layer(RateLimit::GENERATE, behind_proxy)?);
/// ```
pub fn layer(limit: RateLimit, behind_proxy: bool) -> anyhow::Result<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(limit.replenish_interval_ms())
        .burst_size(limit.requests)
        .key_extractor(ClientIpKeyExtractor { behind_proxy })
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit: {:?}", limit))?;

    spawn_pruner(Arc::downgrade(governor_conf.limiter()));

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
