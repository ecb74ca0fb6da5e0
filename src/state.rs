//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AnalyticsService, ContactPolicy, ContactService, LinkService, LinkSettings, RedirectService,
    ReportPolicy, ReportService, StatsService, VisitService,
};
use crate::domain::repositories::{
    AnalyticsRepository, ContactRepository, LinkRepository, ReportRepository, VisitRepository,
};
use crate::infrastructure::persistence::{
    PgAnalyticsRepository, PgContactRepository, PgLinkRepository, PgReportRepository,
    PgVisitRepository,
};

/// Storage backends behind every service.
#[derive(Clone)]
pub struct Repositories {
    pub links: Arc<dyn LinkRepository>,
    pub visits: Arc<dyn VisitRepository>,
    pub reports: Arc<dyn ReportRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
}

impl Repositories {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            links: Arc::new(PgLinkRepository::new(pool.clone())),
            visits: Arc::new(PgVisitRepository::new(pool.clone())),
            reports: Arc::new(PgReportRepository::new(pool.clone())),
            contacts: Arc::new(PgContactRepository::new(pool.clone())),
            analytics: Arc::new(PgAnalyticsRepository::new(pool)),
        }
    }
}

/// Tunables for the services, usually derived from [`crate::config::Config`].
#[derive(Debug, Clone, Default)]
pub struct ServiceSettings {
    pub link: LinkSettings,
    pub report: ReportPolicy,
    pub contact: ContactPolicy,
}

/// Application state shared across all request handlers.
///
/// Cheap to clone: every service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub report_service: Arc<ReportService>,
    pub stats_service: Arc<StatsService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub contact_service: Arc<ContactService>,
    /// Whether client IPs are taken from proxy headers.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the services on top of the given repositories.
    pub fn new(repositories: Repositories, settings: ServiceSettings, behind_proxy: bool) -> Self {
        let link_service = Arc::new(LinkService::new(repositories.links, settings.link));
        let visit_service = Arc::new(VisitService::new(repositories.visits));
        let analytics_service = Arc::new(AnalyticsService::new(repositories.analytics));

        let redirect_service = Arc::new(RedirectService::new(
            link_service.clone(),
            visit_service.clone(),
        ));
        let report_service = Arc::new(ReportService::new(
            link_service.clone(),
            repositories.reports,
            settings.report,
        ));
        let stats_service = Arc::new(StatsService::new(
            link_service.clone(),
            visit_service,
            analytics_service.clone(),
        ));
        let contact_service = Arc::new(ContactService::new(
            repositories.contacts,
            settings.contact,
        ));

        Self {
            link_service,
            redirect_service,
            report_service,
            stats_service,
            analytics_service,
            contact_service,
            behind_proxy,
        }
    }
}
