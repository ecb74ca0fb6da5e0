//! Business logic services for the application layer.

pub mod analytics_service;
pub mod contact_service;
pub mod link_service;
pub mod redirect_service;
pub mod report_service;
pub mod stats_service;
pub mod visit_service;

pub use analytics_service::AnalyticsService;
pub use contact_service::{ContactPolicy, ContactService, SubmitContact};
pub use link_service::{IssuedLink, LinkService, LinkSettings};
pub use redirect_service::{RedirectOutcome, RedirectService};
pub use report_service::{ReportPolicy, ReportService, SubmitReport};
pub use stats_service::{DailyActivity, Dashboard, LinkDetail, Overview, StatsService};
pub use visit_service::VisitService;
